// admin-client/src/client/form.rs
// Multipart form body

use crate::ClientResult;
use crate::upload::StagedFile;

/// Value of one multipart part
#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File(StagedFile),
}

/// Named multipart part
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

/// Ordered multipart body
///
/// Repeated names are allowed: file arrays are sent as one part per file,
/// kept-URL arrays as one text part per URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormBody {
    parts: Vec<FormPart>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar field
    pub fn text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.push_text(name, value);
        self
    }

    /// Append a scalar field only when present
    pub fn text_opt<V: ToString>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.push_text(name, value);
        }
        self
    }

    /// Append a file part
    pub fn file(mut self, name: impl Into<String>, file: StagedFile) -> Self {
        self.push_file(name, file);
        self
    }

    /// Append one text part per value, all under `name`
    pub fn texts<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self.push_text(name, value);
        }
        self
    }

    /// Append one file part per file, all under `name`
    pub fn files<I>(mut self, name: &str, files: I) -> Self
    where
        I: IntoIterator<Item = StagedFile>,
    {
        for file in files {
            self.push_file(name, file);
        }
        self
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl ToString) {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::Text(value.to_string()),
        });
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: StagedFile) {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::File(file),
        });
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// First text value under `name`
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match &p.value {
            PartValue::Text(v) if p.name == name => Some(v.as_str()),
            _ => None,
        })
    }

    /// Every text value under `name`, in order
    pub fn text_values(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|p| match &p.value {
                PartValue::Text(v) if p.name == name => Some(v.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every file under `name`, in order
    pub fn file_values(&self, name: &str) -> Vec<&StagedFile> {
        self.parts
            .iter()
            .filter_map(|p| match &p.value {
                PartValue::File(f) if p.name == name => Some(f),
                _ => None,
            })
            .collect()
    }

    /// Convert into a reqwest multipart form
    pub fn into_reqwest(self) -> ClientResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part.value {
                PartValue::Text(value) => form.text(part.name, value),
                PartValue::File(file) => {
                    let body = reqwest::multipart::Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)?;
                    form.part(part.name, body)
                }
            };
        }
        Ok(form)
    }

    /// Encode as a `multipart/form-data` body with the given boundary
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            match &part.value {
                PartValue::Text(value) => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                            escape_quotes(&part.name)
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(value.as_bytes());
                }
                PartValue::File(file) => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            escape_quotes(&part.name),
                            escape_quotes(&file.file_name),
                            file.content_type
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(&file.bytes);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        out
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('"', "%22")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_parts_keep_order() {
        let form = FormBody::new()
            .text("name", "Cup")
            .texts("existingImages", ["a.jpg", "b.jpg"])
            .files(
                "images",
                [StagedFile::new("new.png", vec![1, 2, 3])],
            );
        assert_eq!(form.text_value("name"), Some("Cup"));
        assert_eq!(form.text_values("existingImages"), vec!["a.jpg", "b.jpg"]);
        assert_eq!(form.file_values("images").len(), 1);
        assert_eq!(form.parts().len(), 4);
    }

    #[test]
    fn test_encode_layout() {
        let form = FormBody::new()
            .text("title", "Hello")
            .file("images", StagedFile::new("a.png", b"PNG".to_vec()));
        let body = String::from_utf8(form.encode("XYZ")).unwrap();
        assert!(body.starts_with(
            "--XYZ\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nHello\r\n"
        ));
        assert!(body.contains(
            "name=\"images\"; filename=\"a.png\"\r\nContent-Type: image/png\r\n\r\nPNG\r\n"
        ));
        assert!(body.ends_with("--XYZ--\r\n"));
    }
}
