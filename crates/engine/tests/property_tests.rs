use adoc_tally_engine::config::ClassifierConfig;
use adoc_tally_engine::processor::LineTally;
use proptest::prelude::*;
use std::io::Cursor;

fn physical_lines(content: &str) -> usize {
    if content.is_empty() {
        0
    } else {
        content.matches('\n').count() + usize::from(!content.ends_with('\n'))
    }
}

proptest! {
    #[test]
    fn test_total_equals_physical_lines(
        content in "[ \\t:/*=a-zA-Z0-9\\n]{0,400}"
    ) {
        let tally = LineTally::read_from(&mut Cursor::new(&content), &ClassifierConfig::default())
            .unwrap();
        prop_assert_eq!(tally.counts.total_lines, physical_lines(&content));
    }

    #[test]
    fn test_every_non_blank_line_lands_in_one_bucket(
        content in "[ \\t:/*=#a-zA-Z0-9\\n]{0,400}"
    ) {
        let tally = LineTally::read_from(&mut Cursor::new(&content), &ClassifierConfig::default())
            .unwrap();
        let non_blank = content.lines().filter(|l| !l.trim_start().is_empty()).count();
        prop_assert_eq!(tally.counts.classified(), non_blank);
        prop_assert!(tally.counts.classified() <= tally.counts.total_lines);
    }

    #[test]
    fn test_excluded_set_only_shrinks_special(
        content in "[ :/*a-z\\n]{0,200}"
    ) {
        let plain = LineTally::read_from(&mut Cursor::new(&content), &ClassifierConfig::default())
            .unwrap();
        let config = ClassifierConfig {
            excluded_leading: vec!['/', '*'],
            ..ClassifierConfig::default()
        };
        let excluded = LineTally::read_from(&mut Cursor::new(&content), &config).unwrap();

        prop_assert_eq!(plain.counts.total_lines, excluded.counts.total_lines);
        prop_assert_eq!(plain.counts.comment_lines, excluded.counts.comment_lines);
        prop_assert_eq!(plain.counts.definition_lines, excluded.counts.definition_lines);
        prop_assert_eq!(plain.counts.alnum_start, excluded.counts.alnum_start);
        prop_assert!(excluded.counts.special_start <= plain.counts.special_start);
    }
}
