//! Per-record-type format descriptors.
//!
//! Mirrors the file layout documented at
//! <https://lemurproject.org/clueweb22/docspecs.php#Organization>: each
//! format has its own shard extension, optional offset sidecar, and
//! compression scheme. See `spec.md` §6's extensions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    Gzip,
    Zip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Txt,
    Html,
    Inlink,
    Outlink,
    Vdom,
    Jpg,
}

impl Format {
    /// Directory / catalog id, e.g. `html`.
    pub fn id(&self) -> &'static str {
        match self {
            Format::Txt => "txt",
            Format::Html => "html",
            Format::Inlink => "inlink",
            Format::Outlink => "outlink",
            Format::Vdom => "vdom",
            Format::Jpg => "jpg",
        }
    }

    /// Shard file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Txt | Format::Inlink | Format::Outlink => ".json.gz",
            Format::Html => ".warc.gz",
            Format::Vdom => ".zip",
            Format::Jpg => "",
        }
    }

    /// Offset sidecar extension, where one exists.
    pub fn offset_extension(&self) -> Option<&'static str> {
        match self {
            Format::Txt | Format::Inlink | Format::Outlink => Some(".offset"),
            Format::Html => Some(".warc.offset"),
            Format::Vdom | Format::Jpg => None,
        }
    }

    pub fn compression(&self) -> Compression {
        match self {
            Format::Vdom => Compression::Zip,
            _ => Compression::Gzip,
        }
    }

    /// Extension of members inside the ZIP archive (VDOM only).
    pub fn inner_extension(&self) -> Option<&'static str> {
        match self {
            Format::Vdom => Some(".bin"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_uses_warc_offset() {
        assert_eq!(Format::Html.offset_extension(), Some(".warc.offset"));
    }

    #[test]
    fn vdom_has_no_offset_sidecar() {
        assert_eq!(Format::Vdom.offset_extension(), None);
        assert_eq!(Format::Vdom.compression(), Compression::Zip);
        assert_eq!(Format::Vdom.inner_extension(), Some(".bin"));
    }

    #[test]
    fn txt_inlink_outlink_share_shape() {
        for format in [Format::Txt, Format::Inlink, Format::Outlink] {
            assert_eq!(format.extension(), ".json.gz");
            assert_eq!(format.offset_extension(), Some(".offset"));
            assert_eq!(format.compression(), Compression::Gzip);
        }
    }
}
