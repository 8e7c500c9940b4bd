use chrono::Utc;
use sha2::{Digest, Sha256};

/// Synthetic article id: `<slug>-<title/source hash>-<unix millis>`.
/// Best-effort unique; collisions are tolerated and ids are never used as
/// deduplication keys.
pub fn synthetic_id(slug: &str, title: &str, source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(source.as_bytes());
    let digest = hasher.finalize();
    let short = u64::from_be_bytes(digest[..8].try_into().expect("digest is 32 bytes"));
    format!("{}-{:x}-{}", slug, short, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shape() {
        let id = synthetic_id("wral", "Some Title", "WRAL News");
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts[0], "wral");
        assert_eq!(parts.len(), 3);
        assert!(parts[2].parse::<i64>().is_ok());
    }

    #[test]
    fn test_same_title_same_hash_component() {
        let a = synthetic_id("x", "Title", "Src");
        let b = synthetic_id("x", "Title", "Src");
        assert_eq!(
            a.split('-').nth(1).unwrap(),
            b.split('-').nth(1).unwrap()
        );
    }
}
