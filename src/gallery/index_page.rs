use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const INDEX_FILE_NAME: &str = "index.html";

/// Wrapper markup placed around the image tags of `index.html`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IndexTemplate {
    /// Plain `<html><body>` document
    #[default]
    Standard,
    /// Legacy layout wrapped in a `<verbatim>` marker
    Verbatim,
}

impl IndexTemplate {
    pub fn opening(&self) -> &'static str {
        match self {
            IndexTemplate::Standard => "<html>\n  <body>\n    ",
            IndexTemplate::Verbatim => "<verbatim>\n  <html>\n    <body>\n      ",
        }
    }

    pub fn closing(&self) -> &'static str {
        match self {
            IndexTemplate::Standard => "\n  </body>\n</html>\n",
            IndexTemplate::Verbatim => "\n    </body>\n  </html>\n</verbatim>\n",
        }
    }

    /// Tags are concatenated without separators.
    pub fn render(&self, img_tags: &[String]) -> String {
        let body_len: usize = img_tags.iter().map(String::len).sum();
        let mut page =
            String::with_capacity(self.opening().len() + body_len + self.closing().len());

        page.push_str(self.opening());
        for tag in img_tags {
            page.push_str(tag);
        }
        page.push_str(self.closing());
        page
    }
}

pub fn image_name(index: usize) -> String {
    format!("img{}", index)
}

pub fn img_tag(name: &str) -> String {
    format!("<img src=\"{}\">", name)
}
