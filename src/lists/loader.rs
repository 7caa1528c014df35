use std::path::Path;

use tracing::info;

use super::{DomainList, ListError};

/// Reads a domain list, one domain per line.
///
/// Blank lines and lines starting with `#` are skipped; entries are trimmed
/// and lower-cased. An unreadable file is an error the caller is expected to
/// treat as fatal.
pub fn load_domain_list(path: impl AsRef<Path>) -> Result<DomainList, ListError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|err| ListError::read(path, err))?;
    let list = parse_domain_list(&content);
    info!(path = %path.display(), domains = list.len(), "domain list loaded");
    Ok(list)
}

pub(crate) fn parse_domain_list(content: &str) -> DomainList {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blanks() {
        let list = parse_domain_list("# header\n\nMailinator.com\n  tempmail.io  \n#x.com\n");
        assert_eq!(list.len(), 2);
        assert!(list.contains("mailinator.com"));
        assert!(list.contains("TEMPMAIL.io"));
        assert!(!list.contains("x.com"));
    }

    #[test]
    fn load_reads_file() {
        let dir = std::env::temp_dir().join(format!("mailtrust-list-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("blocklist.txt");
        std::fs::write(&path, "blocked-domain.test\n").expect("write list");

        let list = load_domain_list(&path).expect("list loads");
        assert!(list.contains("blocked-domain.test"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_domain_list("/definitely/not/here.txt").expect_err("missing file");
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
