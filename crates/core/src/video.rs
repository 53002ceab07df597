use url::Url;

const EMBED_BASE: &str = "https://www.youtube-nocookie.com/embed/";

/// How a lesson's video link can be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// A YouTube video that can be embedded in a player frame.
    Embeddable { video_id: String, watch_url: String },
    /// A valid link to somewhere we cannot embed.
    External { url: String },
    /// Not a URL at all.
    Invalid { raw: String },
}

impl VideoSource {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let Ok(url) = Url::parse(trimmed) else {
            return Self::Invalid {
                raw: raw.to_string(),
            };
        };

        match youtube_id(&url) {
            Some(video_id) => Self::Embeddable {
                video_id,
                watch_url: url.to_string(),
            },
            None => Self::External {
                url: url.to_string(),
            },
        }
    }

    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        match self {
            Self::Embeddable { video_id, .. } => Some(format!("{EMBED_BASE}{video_id}")),
            Self::External { .. } | Self::Invalid { .. } => None,
        }
    }

    /// Link for opening the video outside the app.
    #[must_use]
    pub fn external_url(&self) -> &str {
        match self {
            Self::Embeddable { watch_url, .. } => watch_url,
            Self::External { url } => url,
            Self::Invalid { raw } => raw,
        }
    }

    #[must_use]
    pub fn is_embeddable(&self) -> bool {
        matches!(self, Self::Embeddable { .. })
    }
}

fn youtube_id(url: &Url) -> Option<String> {
    let id = match url.host_str()? {
        "youtu.be" => url.path().trim_start_matches('/').to_string(),
        "youtube.com" | "www.youtube.com" => url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())?,
        _ => return None,
    };

    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(id)
}
