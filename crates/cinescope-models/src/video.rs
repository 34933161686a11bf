use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Video {
    pub fn is_youtube(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Videos {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub results: Vec<Video>,
}

impl Videos {
    /// Videos playable on the video-sharing site
    pub fn youtube(&self) -> Vec<&Video> {
        self.results.iter().filter(|v| v.is_youtube()).collect()
    }

    /// Best trailer: official YouTube trailer, then any YouTube trailer, then any YouTube video
    pub fn trailer(&self) -> Option<&Video> {
        let youtube = self.youtube();
        youtube
            .iter()
            .find(|v| v.kind == "Trailer" && v.official)
            .or_else(|| youtube.iter().find(|v| v.kind == "Trailer"))
            .or_else(|| youtube.first())
            .copied()
    }
}
