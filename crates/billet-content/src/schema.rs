//! Declarative schema for the rich content type, as presented to the
//! hosting studio.

use billet_core::field::{
    ArraySchema, BlockDef, FieldDef, FieldOptions, FieldType, ListOption, Rule,
};
use billet_core::reference::DocType;

/// Registry name of the rich content type.
pub const RICH_CONTENT_TYPE: &str = "bContent";

/// Build the declarative surface of the rich content array: a text
/// block with its styles, lists, decorators and annotations, an image
/// member, and a callout member.
#[must_use]
pub fn rich_content_schema() -> ArraySchema {
    ArraySchema {
        name: RICH_CONTENT_TYPE.to_string(),
        title: "Contenu".to_string(),
        of: vec![block_member(), image_member(), callout_member()],
    }
}

fn block_member() -> FieldDef {
    FieldDef::new("block", FieldType::Block)
        .with_title("Block")
        .with_block(BlockDef {
            styles: vec![
                ListOption::new("Normal", "normal"),
                ListOption::new("Titre H2", "h2"),
                ListOption::new("Titre H3", "h3"),
                ListOption::new("Titre H4", "h4"),
                ListOption::new("Citation", "blockquote"),
            ],
            lists: vec![
                ListOption::new("Bullet", "bullet"),
                ListOption::new("Numbered", "number"),
                ListOption::new("Check", "check"),
            ],
            decorators: vec![
                ListOption::new("Gras", "strong"),
                ListOption::new("Italique", "em"),
                ListOption::new("Souligné", "underline"),
                ListOption::new("Code", "code"),
                ListOption::new("Surligné", "highlight"),
            ],
            annotations: vec![
                FieldDef::new("link", FieldType::Object)
                    .with_title("URL")
                    .with_field(
                        FieldDef::new("href", FieldType::Url)
                            .with_title("URL")
                            .with_rule(Rule::Required),
                    )
                    .with_field(
                        FieldDef::new("blank", FieldType::Boolean)
                            .with_title("Ouvrir dans un nouvel onglet")
                            .with_initial(billet_core::field::InitialValue::Value(
                                serde_json::Value::Bool(true),
                            )),
                    ),
                FieldDef::new("internalLink", FieldType::Object)
                    .with_title("Lien interne")
                    .with_field(
                        FieldDef::new("reference", FieldType::Reference)
                            .with_title("Reference")
                            .with_target(DocType::Post)
                            .with_target(DocType::Author)
                            .with_target(DocType::Category),
                    ),
            ],
        })
}

fn image_member() -> FieldDef {
    FieldDef::new("image", FieldType::Image)
        .with_options(FieldOptions {
            hotspot: true,
            ..FieldOptions::default()
        })
        .with_field(
            FieldDef::new("alt", FieldType::String)
                .with_title("Texte alternatif")
                .with_rule(Rule::Required),
        )
        .with_field(FieldDef::new("caption", FieldType::String).with_title("Légende"))
}

fn callout_member() -> FieldDef {
    FieldDef::new("callout", FieldType::Object)
        .with_title("Callout")
        .with_field(FieldDef::new("text", FieldType::Text).with_title("Texte"))
        .with_field(
            FieldDef::new("type", FieldType::String)
                .with_title("Type")
                .with_options(FieldOptions {
                    list: vec![
                        ListOption::new("Info", "info"),
                        ListOption::new("Warning", "warning"),
                        ListOption::new("Success", "success"),
                        ListOption::new("Error", "error"),
                    ],
                    ..FieldOptions::default()
                }),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_content_declares_three_member_kinds() {
        let schema = rich_content_schema();
        let names: Vec<&str> = schema.of.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["block", "image", "callout"]);
    }

    #[test]
    fn block_member_declares_all_decorators() {
        let schema = rich_content_schema();
        let block = schema.of.iter().find(|m| m.name == "block").expect("block");
        let decorators = &block.block.as_ref().expect("block def").decorators;
        let values: Vec<&str> = decorators.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, ["strong", "em", "underline", "code", "highlight"]);
    }

    #[test]
    fn link_annotation_href_is_required_in_declaration() {
        let schema = rich_content_schema();
        let block = schema.of.iter().find(|m| m.name == "block").expect("block");
        let annotations = &block.block.as_ref().expect("block def").annotations;
        let link = annotations.iter().find(|a| a.name == "link").expect("link");
        let href = link.fields.iter().find(|f| f.name == "href").expect("href");
        assert!(href.is_required());
    }

    #[test]
    fn image_member_requires_alt_in_declaration() {
        let schema = rich_content_schema();
        let image = schema.of.iter().find(|m| m.name == "image").expect("image");
        let alt = image.fields.iter().find(|f| f.name == "alt").expect("alt");
        assert!(alt.is_required());
    }
}
