//! Reduce flat file lists to sequences

use log::debug;
use std::collections::BTreeMap;

use super::pattern::match_number;
use super::range::format_body;
use crate::types::{FileSequence, NumberSet, Template};

/// Numbers seen for each template, keyed and sorted by value
pub type TemplateGroups = BTreeMap<Template, BTreeMap<u64, String>>;

/// Group paths by template
///
/// Paths without a sequence number each become their own literal group
/// holding the single number 0 rendered as `"0"`.
pub fn group_by_template<I, S>(paths: I) -> TemplateGroups
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups: TemplateGroups = BTreeMap::new();

    for path in paths {
        let path = path.as_ref();
        match match_number(path) {
            Some(m) => {
                let template = Template::numbered(&path[..m.span.start], &path[m.span.end..]);
                let numbers = groups.entry(template).or_default();
                if let Some(previous) = numbers.insert(m.value, m.digits.to_string()) {
                    debug!(
                        "{:?} collides with an earlier render {:?} of number {}",
                        path, previous, m.value
                    );
                }
            }
            None => {
                groups
                    .entry(Template::literal(path))
                    .or_default()
                    .insert(0, "0".to_string());
            }
        }
    }

    groups
}

/// Build the finished sequence for one template group
pub fn to_sequence(template: Template, numbers: BTreeMap<u64, String>) -> FileSequence {
    let numbers: NumberSet = numbers.into_iter().collect();
    let notation = format_notation(&template, &numbers);
    FileSequence {
        template,
        numbers,
        notation,
    }
}

/// Canonical notation: numbers sorted ascending and run-collapsed
pub fn format_notation(template: &Template, numbers: &NumberSet) -> String {
    match template {
        Template::Literal { path } => path.clone(),
        Template::Numbered { .. } => template.render(&format_body(&numbers.sorted())),
    }
}

/// Reduce paths to sequences, sorted by notation
pub fn reduce<I, S>(paths: I) -> Vec<FileSequence>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let groups = group_by_template(paths);
    let mut sequences: Vec<FileSequence> = groups
        .into_iter()
        .map(|(template, numbers)| to_sequence(template, numbers))
        .collect();
    sequences.sort_by(|a, b| a.notation.cmp(&b.notation));

    debug!("Reduced to {} sequences", sequences.len());
    sequences
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ========== group_by_template tests ==========

    #[test]
    fn test_group_empty() {
        let paths: Vec<String> = vec![];
        assert!(group_by_template(&paths).is_empty());
    }

    #[test]
    fn test_group_shared_template() {
        let groups = group_by_template(["a.001.jpg", "a.002.jpg", "a.004.jpg"]);
        assert_eq!(groups.len(), 1);
        let numbers = &groups[&Template::numbered("a.", ".jpg")];
        assert_eq!(numbers.get(&1).map(String::as_str), Some("001"));
        assert_eq!(numbers.get(&2).map(String::as_str), Some("002"));
        assert_eq!(numbers.get(&4).map(String::as_str), Some("004"));
    }

    #[test]
    fn test_group_literals_stay_separate() {
        let groups = group_by_template(["b.jpg", "c.jpg"]);
        assert_eq!(groups.len(), 2);
        let numbers = &groups[&Template::literal("b.jpg")];
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers.get(&0).map(String::as_str), Some("0"));
    }

    #[test]
    fn test_group_splits_by_extension_and_directory() {
        let groups = group_by_template(["x/a.1.jpg", "x/a.2.png", "y/a.1.jpg"]);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_group_template_split_at_match() {
        let groups = group_by_template(["1.1.jpg"]);
        assert!(groups.contains_key(&Template::numbered("1.", ".jpg")));
    }

    // ========== reduce tests ==========

    #[test]
    fn test_reduce_example_sequence() {
        let seqs = reduce(["a.002.jpg", "a.004.jpg", "a.001.jpg"]);
        assert_eq!(seqs.len(), 1);
        let seq = &seqs[0];
        assert_eq!(seq.template.to_string(), "a.@.jpg");
        assert_eq!(seq.notation, "a.[001-002,004].jpg");
        assert_eq!(seq.numbers.values(), vec![1, 2, 4]);
        assert_eq!(seq.files(), vec!["a.001.jpg", "a.002.jpg", "a.004.jpg"]);
    }

    #[test]
    fn test_reduce_single_literal_unchanged() {
        let seqs = reduce(["b.jpg"]);
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].notation, "b.jpg");
        assert_eq!(seqs[0].len(), 1);
        assert_eq!(seqs[0].files(), vec!["b.jpg"]);
    }

    #[test]
    fn test_reduce_single_numbered_has_no_brackets() {
        let seqs = reduce(["shot.0005.exr"]);
        assert_eq!(seqs[0].notation, "shot.0005.exr");
    }

    #[test]
    fn test_reduce_sorted_by_notation() {
        let seqs = reduce(["z.1.jpg", "z.2.jpg", "a.jpg", "m_3.png"]);
        let notations: Vec<&str> = seqs.iter().map(|s| s.notation.as_str()).collect();
        assert_eq!(notations, vec!["a.jpg", "m_3.png", "z.[1-2].jpg"]);
    }

    #[test]
    fn test_reduce_round_trip_set_equality() {
        let files = vec![
            "render/beauty.0098.exr",
            "render/beauty.0099.exr",
            "render/beauty.0100.exr",
            "render/beauty.0150.exr",
            "render/notes.txt",
            "audio/take_1.wav",
            "audio/take_2.wav",
            "audio/take_5.wav",
        ];
        let expanded: HashSet<String> = reduce(&files)
            .iter()
            .flat_map(|seq| seq.files())
            .collect();
        let original: HashSet<String> = files.iter().map(|f| f.to_string()).collect();
        assert_eq!(expanded, original);
    }
}
