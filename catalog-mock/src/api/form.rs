//! Multipart form reading

use axum::extract::Multipart;
use shared::models::ContentBlock;

use crate::error::AppResult;
use crate::state::new_id;

/// A received file; only its metadata is kept
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

impl Upload {
    /// URL the stored file is served under
    pub fn url(&self) -> String {
        format!("/uploads/{}-{}", new_id(), self.file_name)
    }
}

/// All parts of a multipart body, in order
#[derive(Debug, Default)]
pub struct ParsedForm {
    fields: Vec<(String, String)>,
    files: Vec<(String, Upload)>,
}

impl ParsedForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = ParsedForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await?;
                    form.files.push((
                        name,
                        Upload {
                            file_name,
                            content_type,
                            size: bytes.len(),
                        },
                    ));
                }
                None => {
                    let value = field.text().await?;
                    form.fields.push((name, value));
                }
            }
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn texts(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn files(&self, name: &str) -> Vec<&Upload> {
        self.files
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, f)| f)
            .collect()
    }

    /// Whether any text or file part is named `name`
    pub fn has(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name) || self.files.iter().any(|(n, _)| n == name)
    }

    /// Blocks sent as `content[i][title|description|icon]`, ordered by index.
    ///
    /// `None` when the body has no content fields at all.
    pub fn content_blocks(&self) -> Option<Vec<ContentBlock>> {
        let mut blocks: Vec<(usize, ContentBlock)> = Vec::new();
        let mut entry = |index: usize| -> usize {
            match blocks.iter().position(|(i, _)| *i == index) {
                Some(pos) => pos,
                None => {
                    blocks.push((index, ContentBlock::default()));
                    blocks.len() - 1
                }
            }
        };

        let mut found = Vec::new();
        for (name, value) in &self.fields {
            if let Some((index, key)) = parse_content_name(name) {
                found.push((index, key, value.clone()));
            }
        }
        for (name, file) in &self.files {
            if let Some((index, key)) = parse_content_name(name) {
                found.push((index, key, file.url()));
            }
        }
        if found.is_empty() {
            return None;
        }

        let mut positions = Vec::with_capacity(found.len());
        for (index, key, value) in found {
            positions.push((entry(index), key, value));
        }
        for (pos, key, value) in positions {
            let block = &mut blocks[pos].1;
            match key {
                "title" => block.title = value,
                "description" => block.description = value,
                "icon" => block.icon = value,
                _ => {}
            }
        }

        blocks.sort_by_key(|(i, _)| *i);
        Some(
            blocks
                .into_iter()
                .map(|(_, mut b)| {
                    b.id = Some(new_id());
                    b
                })
                .collect(),
        )
    }
}

/// Split `content[3][title]` into `(3, "title")`
fn parse_content_name(name: &str) -> Option<(usize, &'static str)> {
    let rest = name.strip_prefix("content[")?;
    let (index, rest) = rest.split_once("][")?;
    let key = rest.strip_suffix(']')?;
    let key = match key {
        "title" => "title",
        "description" => "description",
        "icon" => "icon",
        _ => return None,
    };
    Some((index.parse().ok()?, key))
}
