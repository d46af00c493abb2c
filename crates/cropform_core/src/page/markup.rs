//! Canonical prediction page markup.
//!
//! Builds the structure the components expect: a fixed navbar with
//! same-page links, feature cards, and the prediction form whose inputs
//! carry the declared bounds of each field.

use crate::dom::{Document, DomResult, NodeId};
use crate::model::field::FieldName;
use crate::validation::validator::number_to_display;

const PARAMETER_GROUPS: [(&str, &[FieldName]); 3] = [
    (
        "Soil Nutrients",
        &[FieldName::Nitrogen, FieldName::Phosphorus, FieldName::Potassium],
    ),
    (
        "Climate Conditions",
        &[FieldName::Temperature, FieldName::Humidity, FieldName::Rainfall],
    ),
    ("Soil Properties", &[FieldName::Ph]),
];

const FEATURES: [&str; 3] = [
    "Data-Driven Recommendations",
    "Soil Nutrient Analysis",
    "Climate Awareness",
];

/// Handles to the interesting nodes of a built page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionPage {
    pub navbar: NodeId,
    pub nav_links: Vec<NodeId>,
    pub feature_cards: Vec<NodeId>,
    pub form: NodeId,
    pub parameter_groups: Vec<NodeId>,
    pub inputs: Vec<(FieldName, NodeId)>,
    pub submit_button: NodeId,
}

impl PredictionPage {
    pub fn input(&self, field: FieldName) -> Option<NodeId> {
        self.inputs
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, node)| *node)
    }
}

/// Appends the prediction page to `doc`'s body.
pub fn build_prediction_page<D: Document>(doc: &mut D) -> DomResult<PredictionPage> {
    let body = doc.body();

    let navbar = append(doc, body, "nav", &[("class", "navbar navbar-expand-lg fixed-top")])?;
    let brand = append(doc, navbar, "a", &[("class", "navbar-brand"), ("href", "#home")])?;
    doc.set_text_content(brand, "Crop Recommendation")?;
    let mut nav_links = Vec::new();
    for (href, label) in [("#predict", "Predict"), ("#features", "Features")] {
        let link = append(doc, navbar, "a", &[("class", "nav-link"), ("href", href)])?;
        doc.set_text_content(link, label)?;
        nav_links.push(link);
    }

    let hero = append(doc, body, "section", &[("id", "home"), ("class", "hero")])?;
    let heading = append(doc, hero, "h1", &[])?;
    doc.set_text_content(heading, "Find the best crop for your field")?;

    let features = append(doc, body, "section", &[("id", "features")])?;
    let mut feature_cards = Vec::new();
    for title in FEATURES {
        let card = append(doc, features, "div", &[("class", "feature-card")])?;
        let card_title = append(doc, card, "h5", &[])?;
        doc.set_text_content(card_title, title)?;
        feature_cards.push(card);
    }

    let predict = append(doc, body, "section", &[("id", "predict")])?;
    let form = append(
        doc,
        predict,
        "form",
        &[
            ("class", "prediction-form"),
            ("method", "POST"),
            ("action", "/predict"),
        ],
    )?;

    let mut parameter_groups = Vec::new();
    let mut inputs = Vec::new();
    for (legend, fields) in PARAMETER_GROUPS {
        let group = append(doc, form, "div", &[("class", "parameter-group")])?;
        let heading = append(doc, group, "h6", &[])?;
        doc.set_text_content(heading, legend)?;
        for field in fields {
            inputs.push((*field, append_field(doc, group, *field)?));
        }
        parameter_groups.push(group);
    }

    let submit_button = append(
        doc,
        form,
        "button",
        &[("type", "submit"), ("class", "btn btn-primary")],
    )?;
    doc.set_text_content(submit_button, "Get Recommendation")?;

    Ok(PredictionPage {
        navbar,
        nav_links,
        feature_cards,
        form,
        parameter_groups,
        inputs,
        submit_button,
    })
}

fn append_field<D: Document>(doc: &mut D, group: NodeId, field: FieldName) -> DomResult<NodeId> {
    let descriptor = field.descriptor();
    let wrapper = append(doc, group, "div", &[("class", "mb-3")])?;
    let label = append(
        doc,
        wrapper,
        "label",
        &[("for", field.as_str()), ("class", "form-label")],
    )?;
    doc.set_text_content(label, descriptor.display_name)?;

    let min = number_to_display(descriptor.bounds.min);
    let max = number_to_display(descriptor.bounds.max);
    let step = if descriptor.decimals == 0 { "1" } else { "0.1" };
    append(
        doc,
        wrapper,
        "input",
        &[
            ("type", "number"),
            ("class", "form-control"),
            ("id", field.as_str()),
            ("name", field.as_str()),
            ("min", min.as_str()),
            ("max", max.as_str()),
            ("step", step),
            ("required", ""),
        ],
    )
}

fn append<D: Document>(
    doc: &mut D,
    parent: NodeId,
    tag_name: &str,
    attributes: &[(&str, &str)],
) -> DomResult<NodeId> {
    let node = doc.create_element(tag_name);
    for (name, value) in attributes {
        doc.set_attribute(node, name, value)?;
    }
    doc.append_child(parent, node)?;
    Ok(node)
}
