//! Item template for event rows.

use crate::state::Event;
use rust_decimal::Decimal;

/// Format odds with an explicit `+` on strictly positive values.
pub fn format_odds(odds: Decimal) -> String {
    let odds = odds.normalize();
    if odds > Decimal::ZERO {
        format!("+{}", odds)
    } else {
        odds.to_string()
    }
}

/// Display strings for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub title: String,
    pub sport: String,
    pub team1_odds: String,
    pub team2_odds: String,
}

impl EventCard {
    pub fn new(event: &Event) -> Self {
        Self {
            title: event.matchup(),
            sport: format!("Sport: {}", event.sport),
            team1_odds: format!("{} Odds: {}", event.team1, format_odds(event.odds1)),
            team2_odds: format!("{} Odds: {}", event.team2, format_odds(event.odds2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_odds() {
        assert_eq!(format_odds(dec!(150)), "+150");
        assert_eq!(format_odds(dec!(-120)), "-120");
        assert_eq!(format_odds(dec!(0)), "0");
        assert_eq!(format_odds(dec!(1.85)), "+1.85");
        assert_eq!(format_odds(dec!(150.00)), "+150");
    }

    #[test]
    fn test_card_strings() {
        let event = Event {
            id: "e1".to_string(),
            team1: "A".to_string(),
            team2: "B".to_string(),
            sport: "Hockey".to_string(),
            odds1: dec!(150),
            odds2: dec!(-120),
        };
        assert_eq!(
            EventCard::new(&event),
            EventCard {
                title: "A vs B".to_string(),
                sport: "Sport: Hockey".to_string(),
                team1_odds: "A Odds: +150".to_string(),
                team2_odds: "B Odds: -120".to_string(),
            }
        );
    }
}
