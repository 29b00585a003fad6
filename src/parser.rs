use crate::config::READ_BUFFER_SIZE;
use crate::error::{Result, SynonymError};
use crate::models::PageRecord;
use bzip2::read::BzDecoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Streams `<page>` elements out of a MediaWiki XML export.
///
/// Files ending in `.bz2` are decompressed on the fly. The dump is never held
/// in memory; re-open the file to start over.
pub struct WikiReader {
    reader: Reader<Box<dyn BufRead>>,
    buf: Vec<u8>,
    path: PathBuf,
    depth: usize,
    seen_root: bool,
    done: bool,
}

#[derive(Clone, Copy)]
enum Field {
    Title,
    Ns,
    Id,
    Text,
}

impl WikiReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SynonymError::Input {
            path: path.to_path_buf(),
            source,
        })?;

        let inner: Box<dyn BufRead> = if is_bz2(path) {
            Box::new(BufReader::with_capacity(
                READ_BUFFER_SIZE,
                BzDecoder::new(file),
            ))
        } else {
            Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file))
        };

        info!(path = ?path, compressed = is_bz2(path), "Opened wiki dump");

        Ok(Self::with_source(inner, path.to_path_buf()))
    }

    /// Reads an uncompressed export from any buffered source.
    pub fn from_reader<R: BufRead + 'static>(inner: R) -> Self {
        Self::with_source(Box::new(inner), PathBuf::from("<memory>"))
    }

    fn with_source(inner: Box<dyn BufRead>, path: PathBuf) -> Self {
        Self {
            reader: Reader::from_reader(inner),
            buf: Vec::with_capacity(8192),
            path,
            depth: 0,
            seen_root: false,
            done: false,
        }
    }

    fn next_page(&mut self) -> Result<Option<PageRecord>> {
        let mut page: Option<PageRecord> = None;
        let mut field: Option<Field> = None;
        let mut in_revision = false;
        let mut text_buf = String::new();

        loop {
            self.buf.clear();
            let position = self.reader.buffer_position();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => return Err(xml_error(e, position, &self.path)),
            };

            match event {
                Event::Start(ref e) => {
                    if self.depth == 0 && self.seen_root {
                        return Err(multiple_roots(position));
                    }
                    self.depth += 1;
                    self.seen_root = true;

                    match e.local_name().as_ref() {
                        b"page" => {
                            page = Some(PageRecord::default());
                            field = None;
                            in_revision = false;
                        }
                        b"revision" => in_revision = true,
                        b"title" => field = Some(Field::Title),
                        b"ns" => field = Some(Field::Ns),
                        b"id" if !in_revision => field = Some(Field::Id),
                        b"text" => field = Some(Field::Text),
                        b"redirect" => {
                            if let Some(ref mut p) = page {
                                p.redirect_title = redirect_title(e)
                                    .map_err(|e| xml_error(e, position, &self.path))?;
                            }
                        }
                        _ => {}
                    }
                    text_buf.clear();
                }
                Event::Empty(ref e) => {
                    if self.depth == 0 && self.seen_root {
                        return Err(multiple_roots(position));
                    }
                    self.seen_root = true;
                    if let Some(ref mut p) = page {
                        match e.local_name().as_ref() {
                            b"redirect" => {
                                p.redirect_title = redirect_title(e)
                                    .map_err(|e| xml_error(e, position, &self.path))?;
                            }
                            b"text" => p.text = Some(String::new()),
                            _ => {}
                        }
                    }
                }
                Event::Text(ref e) => {
                    if field.is_some() {
                        let text = e
                            .unescape()
                            .map_err(|e| xml_error(e, position, &self.path))?;
                        text_buf.push_str(&text);
                    }
                }
                Event::CData(ref e) => {
                    if field.is_some() {
                        text_buf.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Event::End(ref e) => {
                    self.depth = self.depth.saturating_sub(1);

                    match e.local_name().as_ref() {
                        b"page" => {
                            if let Some(p) = page.take() {
                                return Ok(Some(p));
                            }
                        }
                        b"revision" => in_revision = false,
                        _ => {
                            if let (Some(f), Some(p)) = (field.take(), page.as_mut()) {
                                assign(p, f, &mut text_buf);
                            }
                        }
                    }
                }
                Event::Eof => {
                    if self.depth > 0 {
                        return Err(SynonymError::Parse {
                            position: position as u64,
                            message: format!(
                                "unexpected end of file with {} unclosed element(s)",
                                self.depth
                            ),
                        });
                    }
                    if !self.seen_root {
                        return Err(SynonymError::Parse {
                            position: position as u64,
                            message: "no XML root element".to_string(),
                        });
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

impl Iterator for WikiReader {
    type Item = Result<PageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_page() {
            Ok(Some(page)) => Some(Ok(page)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn multiple_roots(position: usize) -> SynonymError {
    SynonymError::Parse {
        position: position as u64,
        message: "multiple root elements".to_string(),
    }
}

fn assign(page: &mut PageRecord, field: Field, text_buf: &mut String) {
    match field {
        Field::Title => page.title = std::mem::take(text_buf),
        Field::Ns => {
            page.ns = text_buf.trim().parse().ok();
            if page.ns.is_none() {
                debug!(value = %text_buf, "Ignoring unparseable namespace");
            }
        }
        Field::Id => {
            if page.id.is_none() {
                page.id = text_buf.trim().parse().ok();
            }
        }
        Field::Text => page.text = Some(std::mem::take(text_buf)),
    }
    text_buf.clear();
}

fn redirect_title(e: &BytesStart) -> std::result::Result<Option<String>, quick_xml::Error> {
    match e.try_get_attribute("title")? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn xml_error(err: quick_xml::Error, position: usize, path: &Path) -> SynonymError {
    match err {
        quick_xml::Error::Io(e) => SynonymError::Input {
            path: path.to_path_buf(),
            source: io::Error::new(e.kind(), e.to_string()),
        },
        other => SynonymError::Parse {
            position: position as u64,
            message: other.to_string(),
        },
    }
}

fn is_bz2(path: &Path) -> bool {
    path.extension().map(|e| e == "bz2").unwrap_or(false)
}
