use std::io::BufRead;

use quick_xml::{
    events::Event,
    name::{Namespace, ResolveResult},
    NsReader,
};

use crate::{kml::KmlError, Error};

pub const KML_NAMESPACE: &[u8] = b"http://www.opengis.net/kml/2.2";

#[derive(Debug, Clone, PartialEq)]
pub enum KmlOperation {
    /// Full text of a `coordinates` element owned by a `LineString`.
    Coordinates(String),
    NotSupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KmlTag {
    LineString,
    Coordinates,
    Other,
}

/// Streams a kml document and reports the coordinate blocks of its
/// `LineString`s. Elements outside the kml 2.2 namespace are never matched.
pub struct KmlReader<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    /// open elements, `None` when outside the kml namespace
    stack: Vec<Option<KmlTag>>,
    coordinates: Option<String>,
    /// a start tag was read, an empty or text-only input is no document
    has_root: bool,
    finished: bool,
}

impl<R: BufRead> KmlReader<R> {
    pub fn new(reader: R) -> Self {
        let mut reader = NsReader::from_reader(reader);
        reader.expand_empty_elements(true);

        Self {
            reader,
            buf: Vec::with_capacity(4096),
            stack: vec![],
            coordinates: None,
            has_root: false,
            finished: false,
        }
    }

    fn step(&mut self) -> Result<Option<KmlOperation>, Error> {
        self.buf.clear();
        let (ns, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
        let in_kml = matches!(ns, ResolveResult::Bound(Namespace(ns)) if ns == KML_NAMESPACE);

        let op = match event {
            Event::Start(start) => {
                let tag = in_kml.then(|| match start.local_name().as_ref() {
                    b"LineString" => KmlTag::LineString,
                    b"coordinates" => KmlTag::Coordinates,
                    _ => KmlTag::Other,
                });
                if tag == Some(KmlTag::Coordinates)
                    && self.stack.last() == Some(&Some(KmlTag::LineString))
                {
                    self.coordinates = Some(String::new());
                }
                self.stack.push(tag);
                self.has_root = true;
                KmlOperation::NotSupported
            }
            Event::Text(text) => {
                if let Some(coordinates) = self.coordinates.as_mut() {
                    coordinates.push_str(&text.unescape()?);
                }
                KmlOperation::NotSupported
            }
            Event::CData(data) => {
                if let Some(coordinates) = self.coordinates.as_mut() {
                    coordinates.push_str(&self.reader.decoder().decode(&data)?);
                }
                KmlOperation::NotSupported
            }
            Event::End(_) => match self.stack.pop() {
                Some(Some(KmlTag::Coordinates)) => self
                    .coordinates
                    .take()
                    .map_or(KmlOperation::NotSupported, KmlOperation::Coordinates),
                _ => KmlOperation::NotSupported,
            },
            Event::Eof if !self.has_root => return Err(KmlError::NoRootElement.into()),
            Event::Eof if !self.stack.is_empty() => {
                return Err(KmlError::UnexpectedEof {
                    open: self.stack.len(),
                }
                .into())
            }
            Event::Eof => return Ok(None),
            _ => KmlOperation::NotSupported,
        };
        Ok(Some(op))
    }
}

impl<R: BufRead> Iterator for KmlReader<R> {
    type Item = Result<KmlOperation, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let op = self.step().transpose();
        if !matches!(op, Some(Ok(_))) {
            self.finished = true;
        }
        op
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reports_only_linestring_coordinates() {
        let doc = r#"<kml xmlns="http://www.opengis.net/kml/2.2">
            <Point><coordinates>9,9</coordinates></Point>
            <LineString><coordinates>1,2 3,4</coordinates></LineString>
          </kml>"#;
        let ops: Vec<_> = KmlReader::new(doc.as_bytes())
            .map(Result::unwrap)
            .filter(|op| *op != KmlOperation::NotSupported)
            .collect();

        assert_eq!(ops, vec![KmlOperation::Coordinates("1,2 3,4".to_string())]);
    }

    #[test]
    fn entities_are_unescaped() {
        let doc = r#"<kml xmlns="http://www.opengis.net/kml/2.2">
            <LineString><coordinates>1,2&#32;3,4</coordinates></LineString>
          </kml>"#;
        let ops: Vec<_> = KmlReader::new(doc.as_bytes())
            .filter_map(Result::ok)
            .filter(|op| *op != KmlOperation::NotSupported)
            .collect();

        assert_eq!(ops, vec![KmlOperation::Coordinates("1,2 3,4".to_string())]);
    }

    #[test]
    fn incomplete_documents_fail() {
        let truncated = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
            <LineString><coordinates>1,2 3,4</coordinates></LineString>"#;
        let last = KmlReader::new(truncated.as_bytes()).last();
        assert!(matches!(
            last,
            Some(Err(Error::Kml(KmlError::UnexpectedEof { open: 2 })))
        ));

        for input in ["", "  \n", "1,2 3,4 is not a document"] {
            let last = KmlReader::new(input.as_bytes()).last();
            assert!(
                matches!(last, Some(Err(Error::Kml(KmlError::NoRootElement)))),
                "{input:?}"
            );
        }
    }

    #[test]
    fn stops_after_an_error() {
        let mut reader = KmlReader::new("<kml><a></b></kml>".as_bytes());

        assert!(reader.any(|op| op.is_err()));
        assert!(reader.next().is_none());
    }
}
