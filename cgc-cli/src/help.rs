//! Keyword help texts.
//!
//! Both binaries accept a lone keyword (`help`, `usage`, `input`, `info`,
//! `detail`) in place of their normal arguments and print the matching text.

use cgc_core::constants::MIN_INPUT_FILES;
use cgc_core::types::GeneCaller;

/// A help keyword given as the first argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Help,
    Usage,
    Input,
    Info,
    Detail,
}

impl Keyword {
    /// Match an argument against the keywords, ignoring case.
    #[must_use]
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.to_ascii_lowercase().as_str() {
            "help" => Some(Self::Help),
            "usage" => Some(Self::Usage),
            "input" => Some(Self::Input),
            "info" => Some(Self::Info),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

fn supported_callers() -> String {
    GeneCaller::SUPPORTED
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub const COMPARE_USAGE: &str = "Usage: cgc [OPTIONS] <FILE> <FILE> [FILE...]\n";

pub const NORMALIZE_USAGE: &str =
    "Usage: cgc-normalize [OPTIONS] <CALLER> <INPUT> [OUTPUT]\n";

/// Text printed by `cgc <keyword>`
#[must_use]
pub fn compare_text(keyword: Keyword) -> String {
    match keyword {
        Keyword::Help => format!(
            "cgc reads at least {MIN_INPUT_FILES} files of normalized gene calls, one per gene \
             caller, and reports the genes called by every caller, by some callers, and by one \
             caller only.\nType: cgc usage|input|detail for more information.\n"
        ),
        Keyword::Usage => COMPARE_USAGE.to_string(),
        Keyword::Input => "Input to cgc is a list of files, separated by spaces, each holding \
             the calls of one gene caller. Prepare each file with cgc-normalize so that it \
             has the common record format and names its gene caller in the header comment.\n\
             Example: cgc genemark.calls prodigal.calls\n"
            .to_string(),
        Keyword::Info | Keyword::Detail => format!(
            "Supported gene callers: {}.\nFor more information on input to cgc, type: cgc input\n",
            supported_callers()
        ),
    }
}

/// Text printed by `cgc-normalize <keyword>`
#[must_use]
pub fn normalize_text(keyword: Keyword) -> String {
    match keyword {
        Keyword::Help => "cgc-normalize takes the name of a gene caller and an output file \
             of that caller, and converts the calls to the common format read by cgc.\n\
             Type: cgc-normalize usage|input for more information.\n"
            .to_string(),
        Keyword::Usage => NORMALIZE_USAGE.to_string(),
        Keyword::Input | Keyword::Info | Keyword::Detail => format!(
            "Give the name of a gene caller ({}) followed by the file it produced. \
             For Prodigal use the .sco file (or .gff with --prodigal gff). For GeneMarkS use \
             the .lst file. For Glimmer3 use the .predict file; for Glimmer2 use the .coord \
             file with --glimmer 2. For RAST use the GFF3 export. For PhATE use the \
             start/end/strand table.\n",
            supported_callers()
        ),
    }
}
