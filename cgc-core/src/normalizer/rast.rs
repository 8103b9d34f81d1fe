use crate::config::RastFormat;
use crate::types::{CgcError, GeneCall, GeneCaller};

use super::Normalizer;
use super::gff::parse_cds_line;

/// RAST GFF3 export. Genes are numbered by CDS order.
#[derive(Debug, Default)]
pub struct RastNormalizer {
    format: RastFormat,
    count: u64,
}

impl RastNormalizer {
    #[must_use]
    pub fn new(format: RastFormat) -> Self {
        Self { format, count: 0 }
    }
}

impl Normalizer for RastNormalizer {
    fn gene_caller(&self) -> GeneCaller {
        GeneCaller::Rast
    }

    fn normalize_line(&mut self, line: &str) -> Result<Option<GeneCall>, CgcError> {
        match self.format {
            RastFormat::Gff3 => {
                let Some(feature) = parse_cds_line(line)? else {
                    return Ok(None);
                };
                self.count += 1;
                feature.into_call(GeneCaller::Rast, self.count).map(Some)
            }
        }
    }
}
