//! View-model for a fetched raindrop plus the pure helpers the pages share:
//! status derivation, execute gating, participant-list parsing, and token
//! amount conversion.

use std::fmt;

use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::{Address, U256};

use crate::contracts::IRaindrop;

/// The `getRaindropDetails` tuple, owned by the contract and fetched fresh
/// per page view. Nothing here is mutated locally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaindropDetails {
    pub host: Address,
    pub token: Address,
    pub total_amount: U256,
    pub scheduled_time: u64,
    pub executed: bool,
    pub cancelled: bool,
    pub participant_count: u64,
}

impl From<IRaindrop::getRaindropDetailsReturn> for RaindropDetails {
    fn from(ret: IRaindrop::getRaindropDetailsReturn) -> Self {
        Self {
            host: ret.host,
            token: ret.token,
            total_amount: ret.totalAmount,
            scheduled_time: ret.scheduledTime.saturating_to(),
            executed: ret.executed,
            cancelled: ret.cancelled,
            participant_count: ret.participantCount.saturating_to(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Executed,
    Cancelled,
    Scheduled,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Executed => "Executed",
            Self::Cancelled => "Cancelled",
            Self::Scheduled => "Scheduled",
        })
    }
}

impl Status {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Executed => "status executed",
            Self::Cancelled => "status cancelled",
            Self::Scheduled => "status scheduled",
        }
    }
}

impl RaindropDetails {
    /// Executed wins over cancelled if a tuple ever carried both flags.
    pub fn status(&self) -> Status {
        if self.executed {
            Status::Executed
        } else if self.cancelled {
            Status::Cancelled
        } else {
            Status::Scheduled
        }
    }

    pub fn is_open(&self) -> bool {
        !self.executed && !self.cancelled
    }

    /// Execution opens strictly after the scheduled second, matching the
    /// contract's comparison.
    pub fn can_execute(&self, now: u64) -> bool {
        self.is_open() && now > self.scheduled_time
    }

    pub fn is_host(&self, account: Option<Address>) -> bool {
        account == Some(self.host)
    }
}

/// Split free-form text on whitespace and commas and keep only well-formed
/// addresses, preserving input order. An empty result blocks submission.
pub fn parse_participants(input: &str) -> Vec<Address> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse::<Address>().ok())
        .collect()
}

/// Human decimal string to base units for the given token precision.
/// Rejects empty, negative, and zero amounts.
pub fn parse_token_amount(input: &str, decimals: u8) -> Option<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return None;
    }
    let amount = parse_units(trimmed, decimals).ok()?.get_absolute();
    (!amount.is_zero()).then_some(amount)
}

/// Base units back to a human string, with trailing zeros trimmed.
pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    match format_units(amount, decimals) {
        Ok(text) => {
            if text.contains('.') {
                text.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                text
            }
        }
        Err(_) => amount.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RaindropDetails {
        RaindropDetails {
            host: Address::repeat_byte(0x11),
            token: Address::repeat_byte(0x22),
            total_amount: U256::from(100_000_000u64),
            scheduled_time: 1_700_000_000,
            executed: false,
            cancelled: false,
            participant_count: 3,
        }
    }

    #[test]
    fn status_labels_are_mutually_exclusive() {
        let pending = sample();
        assert_eq!(pending.status(), Status::Scheduled);

        let executed = RaindropDetails {
            executed: true,
            ..sample()
        };
        assert_eq!(executed.status(), Status::Executed);

        let cancelled = RaindropDetails {
            cancelled: true,
            ..sample()
        };
        assert_eq!(cancelled.status(), Status::Cancelled);

        // Hypothetical double flag: executed takes precedence.
        let both = RaindropDetails {
            executed: true,
            cancelled: true,
            ..sample()
        };
        assert_eq!(both.status(), Status::Executed);
    }

    #[test]
    fn can_execute_is_strictly_after_schedule() {
        let d = sample();
        assert!(!d.can_execute(d.scheduled_time - 1));
        assert!(!d.can_execute(d.scheduled_time));
        assert!(d.can_execute(d.scheduled_time + 1));

        let executed = RaindropDetails {
            executed: true,
            ..sample()
        };
        assert!(!executed.can_execute(d.scheduled_time + 1));

        let cancelled = RaindropDetails {
            cancelled: true,
            ..sample()
        };
        assert!(!cancelled.can_execute(d.scheduled_time + 1));
    }

    #[test]
    fn host_gate_requires_exact_address_match() {
        let d = sample();
        assert!(d.is_host(Some(Address::repeat_byte(0x11))));
        assert!(!d.is_host(Some(Address::repeat_byte(0x33))));
        assert!(!d.is_host(None));
    }

    #[test]
    fn participant_parsing_keeps_only_well_formed_addresses() {
        let a = "0x1111111111111111111111111111111111111111";
        let b = "0x2222222222222222222222222222222222222222";
        let input = format!("{a}, {b}  0xGHI");
        let parsed = parse_participants(&input);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], Address::repeat_byte(0x11));
        assert_eq!(parsed[1], Address::repeat_byte(0x22));

        assert!(parse_participants("").is_empty());
        assert!(parse_participants("not-an-address, 0x123").is_empty());
    }

    #[test]
    fn amount_parsing_scales_by_decimals() {
        assert_eq!(
            parse_token_amount("100", 6),
            Some(U256::from(100_000_000u64))
        );
        assert_eq!(
            parse_token_amount("1.5", 6),
            Some(U256::from(1_500_000u64))
        );
        assert_eq!(
            parse_token_amount("1", 18),
            Some(U256::from(1_000_000_000_000_000_000u128))
        );
        assert_eq!(parse_token_amount("0", 6), None);
        assert_eq!(parse_token_amount("-1", 6), None);
        assert_eq!(parse_token_amount("", 6), None);
        assert_eq!(parse_token_amount("abc", 6), None);
    }

    #[test]
    fn amount_formatting_round_trips_cleanly() {
        assert_eq!(format_token_amount(U256::from(100_000_000u64), 6), "100");
        assert_eq!(format_token_amount(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_token_amount(U256::ZERO, 6), "0");
    }
}
