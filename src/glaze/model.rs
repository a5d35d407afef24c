use crate::lightbox::LightboxImage;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A pottery piece as supplied by the content collection.
///
/// Records arrive already validated: `techniques` and `colors` carry at least
/// one entry each. Nothing here re-checks that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub title: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
    pub techniques: Vec<String>,
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textures: Option<Vec<String>>,
    pub description: String,
    #[serde(default)]
    pub ai_description: String,
    #[serde(default)]
    pub featured: bool,
    pub main_image: String,
    #[serde(default)]
    pub detail_images: Vec<String>,
}

impl Piece {
    pub fn new(title: impl Into<String>, date: DateTime<Utc>, main_image: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date,
            techniques: Vec::new(),
            colors: Vec::new(),
            textures: None,
            description: String::new(),
            ai_description: String::new(),
            featured: false,
            main_image: main_image.into(),
            detail_images: Vec::new(),
        }
    }

    /// The flat record the gallery engine works on.
    pub fn to_data(&self, slug: &str) -> PieceData {
        PieceData {
            slug: slug.to_string(),
            title: self.title.clone(),
            date: Some(self.date),
            techniques: self.techniques.clone(),
            colors: self.colors.clone(),
            featured: self.featured,
        }
    }

    /// Main image first, then detail images in their declared order.
    pub fn images(&self) -> Vec<LightboxImage> {
        let main = LightboxImage::new(&self.main_image, &self.title)
            .with_caption(self.description.clone());
        let details = self
            .detail_images
            .iter()
            .enumerate()
            .map(|(i, src)| LightboxImage::new(src, format!("{} - detail {}", self.title, i + 1)));
        std::iter::once(main).chain(details).collect()
    }
}

/// A piece keyed by its slug, as listed from a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub slug: String,
    pub piece: Piece,
}

impl CatalogEntry {
    pub fn new(slug: impl Into<String>, piece: Piece) -> Self {
        Self {
            slug: slug.into(),
            piece,
        }
    }

    pub fn to_data(&self) -> PieceData {
        self.piece.to_data(&self.slug)
    }
}

/// Item record for filtering and sorting.
///
/// `date` is `None` when the source string did not parse; such items order
/// before every dated item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceData {
    pub slug: String,
    pub title: String,
    pub date: Option<DateTime<Utc>>,
    pub techniques: Vec<String>,
    pub colors: Vec<String>,
    pub featured: bool,
}

impl PieceData {
    pub fn has_technique(&self, tag: &str) -> bool {
        self.techniques.iter().any(|t| t == tag)
    }

    pub fn has_color(&self, tag: &str) -> bool {
        self.colors.iter().any(|c| c == tag)
    }
}

/// Parses the date forms the content collection and card attributes use:
/// RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS` and plain `YYYY-MM-DD` dates
/// (taken as midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_plain_dates_as_midnight_utc() {
        let parsed = parse_timestamp("2025-03-15").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_timestamp("2025-03-15T10:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 15, 8, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("soon").is_none());
    }

    #[test]
    fn deserializes_content_record_with_defaults() {
        let json = r#"{
            "title": "Earth Vessel",
            "date": "2025-03-15",
            "techniques": ["hand-building"],
            "colors": ["terracotta"],
            "description": "A squat vessel.",
            "mainImage": "/images/earth-vessel.jpg"
        }"#;
        let piece: Piece = serde_json::from_str(json).unwrap();
        assert!(!piece.featured);
        assert!(piece.detail_images.is_empty());
        assert!(piece.textures.is_none());
        assert_eq!(piece.ai_description, "");
    }

    #[test]
    fn images_start_with_main_image() {
        let mut piece = Piece::new(
            "Spiral Bowl",
            Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap(),
            "/main.jpg",
        );
        piece.detail_images = vec!["/a.jpg".into(), "/b.jpg".into()];

        let images = piece.images();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].src, "/main.jpg");
        assert_eq!(images[2].alt, "Spiral Bowl - detail 2");
    }
}
