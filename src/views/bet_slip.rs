//! Bet slip: stake entry and the place-bet sequence.

use super::parse_amount;
use crate::api::{BetRequest, SportsbookApi};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::state::{Bet, BetType, Event};
use rust_decimal::Decimal;

/// Shown when a failure carries no server message.
pub const BET_FAILED: &str = "Bet failed";
/// Shown after a successful placement.
pub const BET_PLACED: &str = "Bet placed!";

/// Form state for a single bet.
#[derive(Debug, Clone, PartialEq)]
pub struct BetSlip {
    pub event: Event,
    pub bet_type: BetType,
    /// Raw stake as typed.
    pub amount: String,
    /// Team the stake goes on; starts on `team1`.
    pub selection: String,
}

impl BetSlip {
    pub fn new(event: Event, bet_type: BetType) -> Self {
        let selection = event.team1.clone();
        Self {
            event,
            bet_type,
            amount: String::new(),
            selection,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.bet_type {
            BetType::PreMatch => "Place Bet",
            BetType::InPlay => "In-Play Bet",
        }
    }

    /// Switch the selection to the other team.
    pub fn toggle_selection(&mut self) {
        self.selection = if self.selection == self.event.team1 {
            self.event.team2.clone()
        } else {
            self.event.team1.clone()
        };
    }

    /// Accept digits and a single decimal point.
    pub fn push_amount_char(&mut self, c: char) {
        if c.is_ascii_digit() || (c == '.' && !self.amount.contains('.')) {
            self.amount.push(c);
        }
    }

    pub fn pop_amount_char(&mut self) {
        self.amount.pop();
    }

    /// Check the form and build the request body.
    ///
    /// `balance` is the last known balance, if any; a stake above it is
    /// rejected before anything is sent.
    pub fn validate(&self, balance: Option<Decimal>) -> Result<BetRequest> {
        let amount = parse_amount(&self.amount)?;
        if let Some(balance) = balance
            && amount > balance
        {
            return Err(Error::invalid_input(format!(
                "Stake exceeds your balance of ${}",
                balance
            )));
        }
        if !self.event.has_team(&self.selection) {
            return Err(Error::invalid_input("Select one of the two teams"));
        }

        Ok(BetRequest {
            event_id: self.event.id.clone(),
            amount,
            selection: self.selection.clone(),
            bet_type: self.bet_type,
        })
    }

    /// Validate, pass the geolocation gate, then create the bet.
    ///
    /// The first failing step aborts the rest.
    pub async fn submit(
        &self,
        api: &dyn SportsbookApi,
        session: &Session,
        balance: Option<Decimal>,
    ) -> Result<Bet> {
        let request = self.validate(balance)?;

        if !api.check_geolocation().await? {
            tracing::info!("Bet refused by geolocation gate");
            return Err(Error::GeoBlocked);
        }

        let bet = api.place_bet(session, &request).await?;
        tracing::info!(
            "Placed {} bet {} of {} on {}",
            bet.bet_type,
            bet.id,
            bet.amount,
            bet.selection
        );
        Ok(bet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSportsbookApi;
    use crate::state::EventRef;
    use rust_decimal_macros::dec;

    fn event() -> Event {
        Event {
            id: "e1".to_string(),
            team1: "A".to_string(),
            team2: "B".to_string(),
            sport: "Soccer".to_string(),
            odds1: dec!(150),
            odds2: dec!(-120),
        }
    }

    fn slip(amount: &str) -> BetSlip {
        let mut slip = BetSlip::new(event(), BetType::InPlay);
        amount.chars().for_each(|c| slip.push_amount_char(c));
        slip
    }

    fn placed(request: &BetRequest) -> Bet {
        Bet {
            id: "b1".to_string(),
            event: EventRef::Id(request.event_id.clone()),
            amount: request.amount,
            selection: request.selection.clone(),
            bet_type: request.bet_type,
            status: "pending".to_string(),
        }
    }

    #[test]
    fn test_defaults_and_toggle() {
        let mut slip = BetSlip::new(event(), BetType::PreMatch);
        assert_eq!(slip.title(), "Place Bet");
        assert_eq!(slip.selection, "A");
        slip.toggle_selection();
        assert_eq!(slip.selection, "B");
        slip.toggle_selection();
        assert_eq!(slip.selection, "A");
        assert_eq!(BetSlip::new(event(), BetType::InPlay).title(), "In-Play Bet");
    }

    #[test]
    fn test_amount_input_filters_characters() {
        let mut slip = slip("1a2.5.0");
        assert_eq!(slip.amount, "12.50");
        slip.pop_amount_char();
        assert_eq!(slip.amount, "12.5");
    }

    #[test]
    fn test_validate_rejects_stake_over_balance() {
        let err = slip("600").validate(Some(dec!(500))).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(slip("500").validate(Some(dec!(500))).is_ok());
        assert!(slip("600").validate(None).is_ok());
    }

    #[tokio::test]
    async fn test_submit_places_bet_when_allowed() {
        let mut api = MockSportsbookApi::new();
        api.expect_check_geolocation().times(1).returning(|| Ok(true));
        api.expect_place_bet()
            .withf(|session, request| {
                session.token() == "tok"
                    && request.event_id == "e1"
                    && request.amount == dec!(25)
                    && request.selection == "A"
                    && request.bet_type == BetType::InPlay
            })
            .times(1)
            .returning(|_, request| Ok(placed(request)));

        let bet = slip("25")
            .submit(&api, &Session::new("tok"), None)
            .await
            .unwrap();
        assert_eq!(bet.id, "b1");
    }

    #[tokio::test]
    async fn test_geo_block_skips_create() {
        let mut api = MockSportsbookApi::new();
        api.expect_check_geolocation().times(1).returning(|| Ok(false));
        api.expect_place_bet().never();

        let err = slip("25")
            .submit(&api, &Session::new("tok"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GeoBlocked));
        assert_eq!(err.user_message(BET_FAILED), "Betting not allowed in your state");
    }

    #[tokio::test]
    async fn test_invalid_amount_never_reaches_network() {
        let mut api = MockSportsbookApi::new();
        api.expect_check_geolocation().never();
        api.expect_place_bet().never();

        for amount in ["", "0", "0.00", "."] {
            let err = slip(amount)
                .submit(&api, &Session::new("tok"), None)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "amount {:?}", amount);
        }
    }

    #[tokio::test]
    async fn test_server_message_surfaces() {
        let mut api = MockSportsbookApi::new();
        api.expect_check_geolocation().returning(|| Ok(true));
        api.expect_place_bet().returning(|_, _| {
            Err(Error::Api {
                status: 400,
                message: Some("Insufficient balance".to_string()),
            })
        });

        let err = slip("25")
            .submit(&api, &Session::new("tok"), None)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(BET_FAILED), "Insufficient balance");
    }
}
