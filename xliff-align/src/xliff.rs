//! XLIFF 2.0 output for aligned pairs
//!
//! One `<file>` per document pair, one `<unit>` per [`AlignedPair`]. The
//! structural path travels in a custom-namespace attribute on the unit so a
//! translation can later be written back to the right node:
//!
//! ```xml
//! <unit id="u1" srcxml:originxpath="/root[1]/title[1]">
//!     <segment id="s1">
//!         <source>Hello</source>
//!         <target>Bonjour</target>
//!     </segment>
//! </unit>
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::config::XliffOptions;
use crate::emitter::AlignedPair;
use crate::error::{AlignError, AlignResult};
use crate::path::parse_segments;

pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:2.0";
pub const XLIFF_VERSION: &str = "2.0";

/// Everything needed to write one XLIFF document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XliffDocument {
    pub source_language: String,
    pub target_language: String,
    /// Value of the `<file id>` attribute, usually the source file name
    pub file_id: String,
    pub units: Vec<AlignedPair>,
}

impl XliffDocument {
    pub fn new(source_language: &str, target_language: &str, file_id: &str) -> Self {
        Self {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            file_id: file_id.to_string(),
            units: Vec::new(),
        }
    }

    pub fn with_units(mut self, units: Vec<AlignedPair>) -> Self {
        self.units = units;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct XliffWriter {
    options: XliffOptions,
}

impl XliffWriter {
    pub fn new(options: XliffOptions) -> Self {
        Self { options }
    }

    /// Qualified name of the path attribute, e.g. `srcxml:originxpath`
    pub fn path_attribute_name(&self) -> String {
        format!(
            "{}:{}",
            self.options.extension_prefix, self.options.path_attribute
        )
    }

    pub fn write<W: Write>(&self, document: &XliffDocument, out: W) -> AlignResult<()> {
        let mut writer = if self.options.indent_with_tabs {
            Writer::new_with_indent(out, b'\t', 1)
        } else {
            Writer::new_with_indent(out, b' ', 2)
        };

        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
        )?;

        let namespace_attr = format!("xmlns:{}", self.options.extension_prefix);
        let mut root = BytesStart::new("xliff");
        root.push_attribute(("xmlns", XLIFF_NAMESPACE));
        root.push_attribute(("version", XLIFF_VERSION));
        root.push_attribute(("srcLang", document.source_language.as_str()));
        root.push_attribute(("trgLang", document.target_language.as_str()));
        root.push_attribute((
            namespace_attr.as_str(),
            self.options.extension_namespace.as_str(),
        ));
        emit(&mut writer, Event::Start(root))?;

        let mut file = BytesStart::new("file");
        file.push_attribute(("id", document.file_id.as_str()));
        emit(&mut writer, Event::Start(file))?;

        let path_attr = self.path_attribute_name();
        for pair in &document.units {
            let unit_id = format!("u{}", pair.id);
            let mut unit = BytesStart::new("unit");
            unit.push_attribute(("id", unit_id.as_str()));
            unit.push_attribute((path_attr.as_str(), pair.path.as_str()));
            emit(&mut writer, Event::Start(unit))?;

            let mut segment = BytesStart::new("segment");
            segment.push_attribute(("id", "s1"));
            emit(&mut writer, Event::Start(segment))?;
            text_element(&mut writer, "source", &pair.source)?;
            text_element(&mut writer, "target", &pair.target)?;
            emit(&mut writer, Event::End(BytesEnd::new("segment")))?;

            emit(&mut writer, Event::End(BytesEnd::new("unit")))?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("file")))?;
        emit(&mut writer, Event::End(BytesEnd::new("xliff")))?;
        writer
            .into_inner()
            .flush()
            .map_err(|e| AlignError::SerializeError(e.to_string()))
    }

    pub fn to_string(&self, document: &XliffDocument) -> AlignResult<String> {
        let mut buffer = Vec::new();
        self.write(document, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| AlignError::SerializeError(e.to_string()))
    }

    /// Write the document to `path`, creating parent directories as needed
    pub fn write_to_file(&self, document: &XliffDocument, path: &Path) -> AlignResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AlignError::IoError(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let content = self.to_string(document)?;
        fs::write(path, content).map_err(|e| {
            AlignError::IoError(format!("Failed to write '{}': {}", path.display(), e))
        })
    }

    /// Read the units back from an XLIFF document written by [`XliffWriter`]
    pub fn read_units(&self, xliff: &str) -> AlignResult<Vec<AlignedPair>> {
        let mut reader = Reader::from_str(xliff);
        reader.config_mut().trim_text(false);

        let path_attr = self.path_attribute_name();
        let mut units = Vec::new();
        let mut current: Option<AlignedPair> = None;
        let mut field: Option<&'static str> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| AlignError::ParseError(format!("Malformed XLIFF: {}", e)))?;
            match event {
                Event::Start(e) => match e.name().as_ref() {
                    b"unit" => {
                        let mut pair = AlignedPair {
                            id: 0,
                            path: String::new(),
                            source: String::new(),
                            target: String::new(),
                        };
                        for attr in e.attributes().flatten() {
                            let value = attr
                                .unescape_value()
                                .map_err(|e| AlignError::ParseError(e.to_string()))?;
                            let key = attr.key.as_ref();
                            if key == b"id" {
                                pair.id = value
                                    .trim_start_matches('u')
                                    .parse()
                                    .map_err(|_| {
                                        AlignError::ParseError(format!("Bad unit id: {}", value))
                                    })?;
                            } else if key == path_attr.as_bytes() {
                                if parse_segments(&value).is_none() {
                                    return Err(AlignError::ParseError(format!(
                                        "Bad structural path: {}",
                                        value
                                    )));
                                }
                                pair.path = value.into_owned();
                            }
                        }
                        current = Some(pair);
                    }
                    b"source" => field = Some("source"),
                    b"target" => field = Some("target"),
                    _ => {}
                },
                Event::Text(e) => {
                    if let (Some(pair), Some(name)) = (current.as_mut(), field) {
                        let text = e
                            .unescape()
                            .map_err(|e| AlignError::ParseError(e.to_string()))?;
                        match name {
                            "source" => pair.source.push_str(&text),
                            _ => pair.target.push_str(&text),
                        }
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"source" | b"target" => field = None,
                    b"unit" => {
                        if let Some(pair) = current.take() {
                            units.push(pair);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(units)
    }
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> AlignResult<()> {
    writer
        .write_event(event)
        .map_err(|e| AlignError::SerializeError(e.to_string()))
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> AlignResult<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}
