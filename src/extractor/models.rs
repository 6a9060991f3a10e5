//! Data structures for probed video information

use serde::{Deserialize, Deserializer, Serialize};

/// Video information as reported by `yt-dlp --dump-single-json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formats: Vec<Format>,
}

impl VideoInfo {
    /// Title for display, never empty
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Unknown Title"
        } else {
            &self.title
        }
    }

    /// The page URL handed back to yt-dlp for the actual download
    pub fn page_url(&self) -> Option<&str> {
        [&self.webpage_url, &self.original_url, &self.url]
            .into_iter()
            .filter_map(|u| u.as_deref())
            .find(|u| !u.trim().is_empty())
    }

    /// Heights of every format that reports one
    pub fn heights(&self) -> impl Iterator<Item = u32> + '_ {
        self.formats.iter().filter_map(|f| f.height)
    }
}

/// Video format information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Format {
    #[serde(default, deserialize_with = "null_as_default")]
    pub format_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ext: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub format_note: Option<String>,
    pub tbr: Option<f32>, // Total bitrate
}

/// yt-dlp emits `null` for fields it could not extract
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
