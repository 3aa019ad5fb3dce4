use crate::census::constructs::StructuralTable;
use crate::census::render::StructuralTree;
use crate::census::tally::Tally;

/// Walk every node in document order and test it against every predicate.
pub fn classify_tree(tree: &StructuralTree, table: &StructuralTable) -> Tally {
    let mut tally = Tally::new();
    for node in &tree.nodes {
        for predicate in table.predicates() {
            if predicate.rule.matches(node) {
                tally.increment(&predicate.name);
            }
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::render::StructuralNode;

    fn html_tally(html: &str) -> Tally {
        classify_tree(
            &StructuralTree::from_html(html),
            &StructuralTable::html().unwrap(),
        )
    }

    #[test]
    fn test_fixture_tree() {
        let tree = StructuralTree::new(vec![
            StructuralNode::Element {
                tag: "h2".into(),
                classes: vec![],
                attrs: vec![],
            },
            StructuralNode::Comment("x".into()),
            StructuralNode::Element {
                tag: "pre".into(),
                classes: vec![],
                attrs: vec![],
            },
        ]);
        let tally = classify_tree(&tree, &StructuralTable::html().unwrap());
        assert_eq!(tally.get("headings"), 1);
        assert_eq!(tally.get("comment_block"), 1);
        assert_eq!(tally.get("literal_block"), 1);
        assert_eq!(tally.get("listing_block"), 1);
        assert_eq!(tally.len(), 4);
    }

    #[test]
    fn test_rendered_admonition_and_links() {
        let tally = html_tally(
            r##"<div class="admonitionblock note"><table><tr><td>
                <a href="https://example.com">x</a><a id="top"></a>
                <a href="#s" class="xref">s</a></td></tr></table></div>"##,
        );
        assert_eq!(tally.get("admonition"), 1);
        assert_eq!(tally.get("table"), 1);
        assert_eq!(tally.get("inline_link"), 2);
        assert_eq!(tally.get("cross_reference"), 1);
    }

    #[test]
    fn test_checklist_counts_both_list_and_checklist() {
        let tally = html_tally(r#"<ul class="checklist"><li>a</li></ul><ul><li>b</li></ul>"#);
        assert_eq!(tally.get("bulleted_list"), 2);
        assert_eq!(tally.get("checklist"), 1);
    }

    #[test]
    fn test_span_counts_for_both_span_constructs() {
        let tally = html_tally("<p><span>x</span></p>");
        assert_eq!(tally.get("inline_macro"), 1);
        assert_eq!(tally.get("inline_attributes"), 1);
    }

    #[test]
    fn test_empty_tree() {
        let tally = classify_tree(&StructuralTree::default(), &StructuralTable::html().unwrap());
        assert!(tally.is_empty());
    }
}
