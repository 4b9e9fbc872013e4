//! Spatial reference system name resolution for geometry nodes.
//!
//! A geometry node does not always carry its own `srsName`. The lookup
//! walks outward through the document: the node itself, a configured
//! standard SRS, the dataset-wide attribute index, the ancestors and
//! finally the ancestors' `boundedBy/Envelope`.

const SRS_NAME: &str = "srsName";
const BOUNDED_BY: &str = "boundedBy";
const ENVELOPE: &str = "Envelope";

/// Read access to a node of the document tree holding the geometry.
pub trait SrsNode: Sized {
    /// Value of the attribute with the given local name.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Local (namespace-free) element name.
    fn local_name(&self) -> String;

    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Vec<Self>;

    /// Distinct values of the named attribute across the whole dataset.
    ///
    /// `None` means no index is available for the node's dataset.
    fn indexed_attribute_values(&self, name: &str) -> Option<Vec<String>>;

    /// Ancestors, nearest first.
    fn ancestors(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            out.push(node);
        }
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct SrsLookup {
    standard_srs: Option<String>,
}

impl SrsLookup {
    /// An empty standard SRS name is treated as absent.
    pub fn new(standard_srs: Option<String>) -> Self {
        Self {
            standard_srs: standard_srs.filter(|s| !s.is_empty()),
        }
    }

    pub fn standard_srs(&self) -> Option<&str> {
        self.standard_srs.as_deref()
    }

    /// Determine the SRS name applicable to `node`, or `None` if unresolved.
    pub fn resolve<N: SrsNode>(&self, node: &N) -> Option<String> {
        if let Some(srs) = node.attribute(SRS_NAME) {
            return Some(srs);
        }
        if let Some(srs) = &self.standard_srs {
            return Some(srs.clone());
        }

        if let Some(values) = node.indexed_attribute_values(SRS_NAME) {
            match values.len() {
                // the dataset has no srsName at all
                0 => return None,
                1 => return values.into_iter().next(),
                _ => {}
            }
        }

        let ancestors = node.ancestors();
        if let Some(srs) = ancestors.iter().find_map(|a| a.attribute(SRS_NAME)) {
            return Some(srs);
        }

        ancestors.iter().find_map(|ancestor| {
            ancestor
                .children()
                .into_iter()
                .filter(|c| c.local_name() == BOUNDED_BY)
                .flat_map(|bounded_by| bounded_by.children())
                .filter(|c| c.local_name() == ENVELOPE)
                .find_map(|envelope| envelope.attribute(SRS_NAME))
        })
    }
}
