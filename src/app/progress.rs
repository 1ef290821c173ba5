//! Per-address progress lines.

use log::debug;

use crate::geo::{LookupEvent, ProgressSink};

/// Prints a line to stdout for each finished lookup.
///
/// `ADDRESS: <addr> -- COUNTRY: <cc> (<name>) -- DESC: <desc>` on success,
/// `ADDRESS: <addr> -- Skipped (<reason>)` otherwise. Lookup starts are only
/// logged at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ConsoleProgress {
    /// Formats the progress line for an event, if it has one.
    pub fn line_for(event: &LookupEvent) -> Option<String> {
        match event {
            LookupEvent::Started { .. } => None,
            LookupEvent::Classified(c) => Some(format!(
                "ADDRESS: {} -- COUNTRY: {} ({}) -- DESC: {}",
                c.address, c.country_code, c.country_name, c.description
            )),
            LookupEvent::Skipped { address, reason } => {
                Some(format!("ADDRESS: {address} -- Skipped ({reason})"))
            }
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_event(&self, event: &LookupEvent) {
        if let LookupEvent::Started { address } = event {
            debug!("Looking up {address}");
        }
        if let Some(line) = Self::line_for(event) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::LookupError;
    use crate::geo::Classification;
    use crate::netstat::Ipv4Token;

    fn token(s: &str) -> Ipv4Token {
        Ipv4Token::parse(s).unwrap()
    }

    #[test]
    fn test_classified_line() {
        let event = LookupEvent::Classified(Classification {
            address: token("203.0.113.9"),
            country_code: "CN".into(),
            country_name: "China".into(),
            description: "Example ISP".into(),
            is_foreign: true,
        });
        assert_eq!(
            ConsoleProgress::line_for(&event).as_deref(),
            Some("ADDRESS: 203.0.113.9 -- COUNTRY: CN (China) -- DESC: Example ISP")
        );
    }

    #[test]
    fn test_skipped_line() {
        let event = LookupEvent::Skipped {
            address: token("198.51.100.2"),
            reason: LookupError::Timeout(5),
        };
        assert_eq!(
            ConsoleProgress::line_for(&event).as_deref(),
            Some("ADDRESS: 198.51.100.2 -- Skipped (lookup timed out after 5s)")
        );
    }

    #[test]
    fn test_started_prints_nothing() {
        let event = LookupEvent::Started {
            address: token("192.0.2.1"),
        };
        assert!(ConsoleProgress::line_for(&event).is_none());
        ConsoleProgress.on_event(&event);
    }
}
