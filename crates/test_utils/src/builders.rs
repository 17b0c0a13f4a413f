//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use core_kernel::{DivisionId, FieldId, GameId, TeamId};
use domain_fees::{NewDiscountCode, PaymentMethod, ProcessingFeePolicy, TeamFeeInput};
use domain_scheduling::{Game, GameKind, Participant, TeamRef, TimeslotTemplate};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{FeeFixtures, IdFixtures, TemporalFixtures};

/// Builder for scheduled games
pub struct TestGameBuilder {
    game: Game,
}

impl Default for TestGameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGameBuilder {
    /// A 50-minute pool game at 08:00 on the standard field, seeds 1 v 2
    pub fn new() -> Self {
        Self {
            game: Game {
                id: GameId::new(),
                game_number: 1,
                division_id: IdFixtures::division_id(),
                field_id: IdFixtures::field_id(),
                start: TemporalFixtures::at(8, 0),
                duration_minutes: 50,
                home: Participant::Seed(1),
                away: Participant::Seed(2),
                round: 1,
                kind: GameKind::Pool,
            },
        }
    }

    pub fn with_number(mut self, game_number: u32) -> Self {
        self.game.game_number = game_number;
        self
    }

    pub fn with_division(mut self, division_id: DivisionId) -> Self {
        self.game.division_id = division_id;
        self
    }

    pub fn on_field(mut self, field_id: FieldId) -> Self {
        self.game.field_id = field_id;
        self
    }

    pub fn starting_at(mut self, start: NaiveDateTime) -> Self {
        self.game.start = start;
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.game.duration_minutes = minutes;
        self
    }

    /// Sets both sides to concrete teams
    pub fn between(mut self, home: TeamId, away: TeamId) -> Self {
        self.game.home = Participant::Team(home);
        self.game.away = Participant::Team(away);
        self
    }

    pub fn with_sides(mut self, home: Participant, away: Participant) -> Self {
        self.game.home = home;
        self.game.away = away;
        self
    }

    pub fn in_round(mut self, round: u32) -> Self {
        self.game.round = round;
        self
    }

    pub fn build(self) -> Game {
        self.game
    }
}

/// Builder for teams as the scheduler sees them
pub struct TestTeamBuilder {
    id: TeamId,
    name: String,
    division_id: DivisionId,
    club_name: Option<String>,
}

impl Default for TestTeamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTeamBuilder {
    /// A team in the standard division with a randomly generated club
    pub fn new() -> Self {
        let club: String = CompanyName().fake();
        Self {
            id: TeamId::new(),
            name: format!("{} 2011", club),
            division_id: IdFixtures::division_id(),
            club_name: Some(club),
        }
    }

    pub fn with_id(mut self, id: TeamId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_division(mut self, division_id: DivisionId) -> Self {
        self.division_id = division_id;
        self
    }

    pub fn with_club(mut self, club_name: Option<String>) -> Self {
        self.club_name = club_name;
        self
    }

    pub fn build(self) -> TeamRef {
        TeamRef {
            id: self.id,
            name: self.name,
            division_id: self.division_id,
            club_name: self.club_name,
        }
    }
}

/// Builder for discount codes
pub struct TestDiscountCodeBuilder {
    code: NewDiscountCode,
}

impl Default for TestDiscountCodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDiscountCodeBuilder {
    /// `EARLYBIRD`, 10% off, no limits
    pub fn new() -> Self {
        Self {
            code: NewDiscountCode {
                code: "EARLYBIRD".to_string(),
                value: dec!(10),
                is_percentage: true,
                valid_from: None,
                valid_until: None,
                max_uses: None,
            },
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code.code = code.into();
        self
    }

    pub fn percent(mut self, value: Decimal) -> Self {
        self.code.value = value;
        self.code.is_percentage = true;
        self
    }

    pub fn fixed(mut self, value: Decimal) -> Self {
        self.code.value = value;
        self.code.is_percentage = false;
        self
    }

    pub fn valid_between(mut self, from: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        self.code.valid_from = from;
        self.code.valid_until = until;
        self
    }

    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.code.max_uses = Some(max_uses);
        self
    }

    pub fn build(self) -> NewDiscountCode {
        self.code
    }
}

/// Builder for a field's timeslot template
pub struct TestTimeslotBuilder {
    template: TimeslotTemplate,
}

impl Default for TestTimeslotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTimeslotBuilder {
    /// Eight hourly slots from 08:00 on the standard field and game day
    pub fn new() -> Self {
        Self {
            template: TimeslotTemplate {
                field_id: IdFixtures::field_id(),
                date: TemporalFixtures::game_day(),
                first_game: TemporalFixtures::first_game_time(),
                game_interval_minutes: 60,
                max_games: 8,
            },
        }
    }

    pub fn on_field(mut self, field_id: FieldId) -> Self {
        self.template.field_id = field_id;
        self
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.template.date = date;
        self
    }

    pub fn first_game(mut self, time: NaiveTime) -> Self {
        self.template.first_game = time;
        self
    }

    pub fn every(mut self, minutes: u32) -> Self {
        self.template.game_interval_minutes = minutes;
        self
    }

    pub fn max_games(mut self, max_games: u32) -> Self {
        self.template.max_games = max_games;
        self
    }

    pub fn build(self) -> TimeslotTemplate {
        self.template
    }
}

/// Builder for team fee inputs
pub struct TestTeamFeeBuilder {
    deposit: Decimal,
    balance_due: Decimal,
    charge_full_amount: bool,
    discount: Decimal,
    processing: ProcessingFeePolicy,
    payment_method: PaymentMethod,
    paid_total: Decimal,
}

impl Default for TestTeamFeeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTeamFeeBuilder {
    /// Standard U14 fees, full amount, card payment with surcharge
    pub fn new() -> Self {
        Self {
            deposit: FeeFixtures::team_deposit(),
            balance_due: FeeFixtures::team_balance_due(),
            charge_full_amount: true,
            discount: Decimal::ZERO,
            processing: FeeFixtures::card_surcharge(),
            payment_method: PaymentMethod::CreditCard,
            paid_total: Decimal::ZERO,
        }
    }

    pub fn with_amounts(mut self, deposit: Decimal, balance_due: Decimal) -> Self {
        self.deposit = deposit;
        self.balance_due = balance_due;
        self
    }

    pub fn deposit_only(mut self) -> Self {
        self.charge_full_amount = false;
        self
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_processing(mut self, processing: ProcessingFeePolicy) -> Self {
        self.processing = processing;
        self
    }

    pub fn paying_by(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_paid(mut self, paid_total: Decimal) -> Self {
        self.paid_total = paid_total;
        self
    }

    pub fn build(self) -> TeamFeeInput {
        let mut input = TeamFeeInput::new_registration(
            self.deposit,
            self.balance_due,
            self.charge_full_amount,
            self.discount,
            self.processing,
            self.payment_method,
        )
        .expect("builder amounts are within the fee range");
        input.paid_total = self.paid_total;
        input
    }
}
