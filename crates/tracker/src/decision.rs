//! Conversion decision for one page load.
//!
//! Checks run in a fixed order and the first match wins:
//! 1. the campaign already converted this session
//! 2. the host asked to never convert
//! 3. the host asked to always convert
//! 4. final page of a multi-page flow, reached without a redirect
//! 5. single-page flow reached through a redirect

use std::fmt;

use conversion_core::TrackerConfig;
use serde::{Deserialize, Serialize};

use crate::page::PageDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    AlreadyConverted,
    ForcedSkip,
    ForcedConversion,
    FinalStep,
    RedirectedSinglePage,
    NoMatch,
}

impl Decision {
    pub fn converts(&self) -> bool {
        matches!(
            self,
            Decision::ForcedConversion | Decision::FinalStep | Decision::RedirectedSinglePage
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::AlreadyConverted => "already_converted",
            Decision::ForcedSkip => "forced_skip",
            Decision::ForcedConversion => "forced_conversion",
            Decision::FinalStep => "final_step",
            Decision::RedirectedSinglePage => "redirected_single_page",
            Decision::NoMatch => "no_match",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide whether `current` is a conversion.
pub fn decide(
    current: &PageDescriptor,
    already_converted: bool,
    config: &TrackerConfig,
) -> Decision {
    if already_converted {
        return Decision::AlreadyConverted;
    }
    if config.force_skip {
        return Decision::ForcedSkip;
    }
    if config.force_convert {
        return Decision::ForcedConversion;
    }

    if current.is_last_page() && current.has_more_than_one_page() && !current.has_redirect() {
        Decision::FinalStep
    } else if current.is_single_page() && current.has_redirect() {
        Decision::RedirectedSinglePage
    } else {
        Decision::NoMatch
    }
}
