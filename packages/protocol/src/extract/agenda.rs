//! Agenda items (`tagesordnungspunkt`).

use roxmltree::Document;

use crate::types::{AgendaItem, AgendaItems};
use crate::xml::{attribute_or_empty, descendants_with_tag, get_text, has_class};

/// Paragraph class marking an agenda item's title.
const TITLE_CLASS: &str = "T_fett";

/// Extract all agenda items in document order.
///
/// Nested items are returned as separate entries; nothing is deduplicated.
pub fn extract_agenda_items(doc: &Document<'_>) -> AgendaItems {
    let tagesordnungspunkte = descendants_with_tag(doc.root_element(), "tagesordnungspunkt")
        .map(|top| {
            let title_node = descendants_with_tag(top, "p").find(|p| has_class(*p, TITLE_CLASS));

            let beschreibung = descendants_with_tag(top, "p")
                .filter(|p| Some(*p) != title_node)
                .map(get_text)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n");

            AgendaItem {
                id: attribute_or_empty(top, "top-id"),
                titel: title_node.map(get_text).unwrap_or_default(),
                beschreibung,
            }
        })
        .collect();

    AgendaItems {
        tagesordnungspunkte,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_agenda_items() {
        let xml = br#"<dbtplenarprotokoll><sitzungsverlauf>
  <tagesordnungspunkt top-id="Tagesordnungspunkt 1">
    <p klasse="T_NaS">Vorab</p>
    <p klasse="T_fett"> Haushaltsgesetz 2025 </p>
    <p klasse="T_Drs">Drucksache 20/1234</p>
    <p klasse="J_1">   </p>
  </tagesordnungspunkt>
  <tagesordnungspunkt top-id="Tagesordnungspunkt 2">
    <p klasse="J_1">Ohne Titel</p>
  </tagesordnungspunkt>
</sitzungsverlauf></dbtplenarprotokoll>"#;
        let doc = parse_document(xml).unwrap();
        let items = extract_agenda_items(&doc).tagesordnungspunkte;

        assert_eq!(
            items,
            vec![
                AgendaItem {
                    id: "Tagesordnungspunkt 1".to_string(),
                    titel: "Haushaltsgesetz 2025".to_string(),
                    beschreibung: "Vorab\nDrucksache 20/1234".to_string(),
                },
                AgendaItem {
                    id: "Tagesordnungspunkt 2".to_string(),
                    titel: String::new(),
                    beschreibung: "Ohne Titel".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_nested_agenda_items_are_not_deduplicated() {
        let xml = r#"<r><tagesordnungspunkt top-id="A">
  <p klasse="T_fett">Außen</p>
  <tagesordnungspunkt top-id="B"><p klasse="T_fett">Innen</p></tagesordnungspunkt>
</tagesordnungspunkt></r>"#;
        let doc = parse_document(xml.as_bytes()).unwrap();
        let items = extract_agenda_items(&doc).tagesordnungspunkte;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].titel, "Außen");
        assert_eq!(items[0].beschreibung, "Innen");
        assert_eq!(items[1].id, "B");
        assert_eq!(items[1].titel, "Innen");
    }

    #[test]
    fn test_no_agenda_items() {
        let doc = parse_document(b"<dbtplenarprotokoll/>").unwrap();
        assert!(extract_agenda_items(&doc).tagesordnungspunkte.is_empty());
    }
}
