//! Series source trait definition.

use std::sync::Arc;

use crate::model::{SeriesIdentity, TsData};

/// Supplier of the ordered collection of named series.
///
/// The source owns the series data; consumers only keep shared handles.
pub trait SeriesSource {
    /// Current collection, in display order.
    fn series(&self) -> Vec<(SeriesIdentity, Arc<TsData>)>;
}
