//! Example-value suggestion lists for the prediction inputs.

use crate::dom::{Document, DomResult};
use crate::model::field::FieldName;
use crate::validation::validator::number_to_display;
use log::debug;

/// Id of the `<datalist>` attached to `field`.
pub fn suggestion_list_id(field: FieldName) -> String {
    format!("{}-suggestions", field.as_str())
}

/// Attaches a `<datalist>` of example values to every known input present.
///
/// Inputs whose list already exists, or that have no parent to hold the
/// list, are skipped. Returns the number of lists created.
pub fn install<D: Document>(doc: &mut D) -> DomResult<usize> {
    let mut created = 0;
    for field in FieldName::ALL {
        let Some(input) = doc.element_by_id(field.as_str()) else {
            continue;
        };
        let list_id = suggestion_list_id(field);
        if doc.element_by_id(&list_id).is_some() {
            continue;
        }
        let Some(parent) = doc.parent(input) else {
            continue;
        };

        let datalist = doc.create_element("datalist");
        doc.set_attribute(datalist, "id", &list_id)?;
        for example in field.descriptor().examples {
            let option = doc.create_element("option");
            doc.set_attribute(option, "value", &number_to_display(*example))?;
            doc.append_child(datalist, option)?;
        }
        doc.set_attribute(input, "list", &list_id)?;
        doc.append_child(parent, datalist)?;
        created += 1;
    }
    debug!("event=autocomplete_install module=autocomplete status=ok lists={created}");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::{install, suggestion_list_id};
    use crate::dom::{Document, MemoryDocument};
    use crate::model::field::FieldName;

    #[test]
    fn ph_examples_render_in_shortest_form() {
        let mut doc = MemoryDocument::new();
        let wrapper = doc.create_element("div");
        let input = doc.create_element("input");
        doc.set_attribute(input, "id", "ph").expect("id");
        doc.append_child(doc.body(), wrapper).expect("append");
        doc.append_child(wrapper, input).expect("append");

        assert_eq!(install(&mut doc).expect("install"), 1);
        assert_eq!(doc.attribute(input, "list").as_deref(), Some("ph-suggestions"));

        let list = doc
            .element_by_id(&suggestion_list_id(FieldName::Ph))
            .expect("datalist");
        assert_eq!(doc.parent(list), Some(wrapper));
        let values = doc
            .children(list)
            .into_iter()
            .filter_map(|option| doc.attribute(option, "value"))
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["5.5", "6", "6.5", "7", "7.5"]);
    }

    #[test]
    fn second_install_does_not_duplicate_lists() {
        let mut doc = MemoryDocument::new();
        let input = doc.create_element("input");
        doc.set_attribute(input, "id", "nitrogen").expect("id");
        doc.append_child(doc.body(), input).expect("append");

        assert_eq!(install(&mut doc).expect("first install"), 1);
        assert_eq!(install(&mut doc).expect("second install"), 0);
        let lists = doc
            .query_selector_all(doc.root(), "datalist")
            .expect("query lists");
        assert_eq!(lists.len(), 1);
        assert_eq!(doc.children(lists[0]).len(), 5);
    }
}
