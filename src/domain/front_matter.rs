//! YAML front matter at the head of imported post documents.
//!
//! A document opens with a `---` line, carries YAML up to the next `---`
//! line and continues with the post body. Documents without the opening
//! line are all body.

use serde::Deserialize;

use super::error::DomainError;

const DELIMITER: &str = "---";
const FIELD: &str = "frontMatter";

/// Post metadata recognised in front matter. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostFrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    #[serde(alias = "category_id")]
    pub category_id: Option<i32>,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    #[serde(alias = "reading_time")]
    pub reading_time: Option<i32>,
}

/// Split `source` into its raw YAML block (if any) and the body after it.
pub fn split_front_matter(source: &str) -> Result<(Option<&str>, &str), DomainError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok((None, source));
    };
    if first.trim_end() != DELIMITER {
        return Ok((None, source));
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let yaml = &source[yaml_start..offset];
            let body = &source[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    Err(DomainError::validation(
        FIELD,
        "missing closing `---` delimiter",
    ))
}

/// Parse the front matter of `source` and return it with the remaining body.
pub fn parse_front_matter(source: &str) -> Result<(PostFrontMatter, &str), DomainError> {
    let (yaml, body) = split_front_matter(source)?;

    let front_matter = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)
            .map_err(|err| DomainError::validation(FIELD, err.to_string()))?,
        _ => PostFrontMatter::default(),
    };

    Ok((front_matter, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_without_front_matter_are_all_body() {
        let (yaml, body) = split_front_matter("# Judul\n\nIsi").expect("split");
        assert_eq!(yaml, None);
        assert_eq!(body, "# Judul\n\nIsi");

        assert_eq!(split_front_matter("").expect("split"), (None, ""));
    }

    #[test]
    fn splits_on_delimiter_lines_with_crlf() {
        let source = "---\r\ntitle: Halo\r\n---\r\nIsi tulisan\r\n";
        let (yaml, body) = split_front_matter(source).expect("split");

        assert_eq!(yaml, Some("title: Halo\r\n"));
        assert_eq!(body, "Isi tulisan\r\n");
    }

    #[test]
    fn delimiter_inside_body_is_kept() {
        let source = "---\ntitle: A\n---\nsatu\n---\ndua";
        let (_, body) = split_front_matter(source).expect("split");
        assert_eq!(body, "satu\n---\ndua");
    }

    #[test]
    fn unterminated_block_is_rejected() {
        let err = split_front_matter("---\ntitle: Halo\nIsi").expect_err("no closing line");
        assert_eq!(err.field(), FIELD);
    }

    #[test]
    fn parses_camel_and_snake_case_keys() {
        let source = "---\n\
                      title: Belajar Rust\n\
                      slug: belajar-rust\n\
                      categoryId: 3\n\
                      reading_time: 7\n\
                      tags: [rust, pemrograman]\n\
                      layout: wide\n\
                      ---\n\
                      Isi";
        let (front_matter, body) = parse_front_matter(source).expect("parse");

        assert_eq!(front_matter.title.as_deref(), Some("Belajar Rust"));
        assert_eq!(front_matter.slug.as_deref(), Some("belajar-rust"));
        assert_eq!(front_matter.category_id, Some(3));
        assert_eq!(front_matter.reading_time, Some(7));
        assert_eq!(front_matter.tags, vec!["rust", "pemrograman"]);
        assert_eq!(front_matter.excerpt, None);
        assert_eq!(body, "Isi");
    }

    #[test]
    fn empty_block_yields_defaults() {
        let (front_matter, body) = parse_front_matter("---\n---\nIsi").expect("parse");
        assert_eq!(front_matter, PostFrontMatter::default());
        assert_eq!(body, "Isi");
    }

    #[test]
    fn malformed_yaml_is_a_validation_error() {
        let err = parse_front_matter("---\ncategoryId: [tidak\n---\nIsi").expect_err("bad yaml");
        assert_eq!(err.field(), FIELD);
    }
}
