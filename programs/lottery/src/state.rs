use anchor_lang::prelude::*;

use crate::{constants::MAX_PLAYERS, errors::LotteryError, utils::winner_index};

#[account]
#[derive(InitSpace, Default)]
pub struct Config {
    pub admin: Pubkey,
    pub bump: u8,

    pub entrance_fee: u64,
    /// Seconds between draws.
    pub interval: i64,

    // VRF request parameters, forwarded verbatim to the coordinator
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_compute_limit: u32,
    pub request_confirmations: u16,
    pub num_words: u32,

    /// The only signer allowed to deliver random words.
    pub vrf_coordinator: Pubkey,

    pub version: u16,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum LotteryState {
    #[default]
    Open,
    Calculating,
}

/// Result of evaluating the four draw conditions.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpkeepStatus {
    pub upkeep_needed: bool,

    pub is_open: bool,
    pub has_players: bool,
    pub has_balance: bool,
    pub time_passed: bool,

    pub player_count: u32,
    pub pool_balance: u64,
    pub elapsed: i64,
}

/// Outcome of a processed fulfillment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fulfillment {
    pub winner: Pubkey,
    pub winner_index: u32,
    pub payout: u64,
}

#[account]
#[derive(InitSpace, Default)]
pub struct Lottery {
    pub config: Pubkey,
    pub bump: u8,

    // System-owned PDA vault (holds the pool, no data)
    pub vault: Pubkey,
    pub vault_bump: u8,

    pub state: LotteryState,

    /// Entrants of the current round, in arrival order.
    /// NOTE: max_len must stay in sync with MAX_PLAYERS.
    #[max_len(100)]
    pub players: Vec<Pubkey>,

    /// Set only while Calculating.
    pub pending_request: Option<[u8; 32]>,
    pub request_nonce: u64,

    pub recent_winner: Option<Pubkey>,
    pub latest_timestamp: i64,
    pub rounds_completed: u64,

    pub version: u16,
}

impl Lottery {
    pub fn is_open(&self) -> bool {
        self.state == LotteryState::Open
    }

    pub fn state(&self) -> LotteryState {
        self.state
    }

    pub fn number_of_players(&self) -> u32 {
        self.players.len() as u32
    }

    pub fn player(&self, index: u32) -> Result<Pubkey> {
        self.players
            .get(index as usize)
            .copied()
            .ok_or_else(|| error!(LotteryError::IndexOutOfRange))
    }

    pub fn recent_winner(&self) -> Option<Pubkey> {
        self.recent_winner
    }

    pub fn latest_timestamp(&self) -> i64 {
        self.latest_timestamp
    }

    pub fn pending_request(&self) -> Option<[u8; 32]> {
        self.pending_request
    }

    /// Stake is checked before the round state, so an underpaying entry is
    /// always reported as such.
    pub fn check_entry(&self, amount: u64, entrance_fee: u64) -> Result<()> {
        require!(amount >= entrance_fee, LotteryError::InsufficientStake);
        require!(self.is_open(), LotteryError::RoundNotOpen);
        require!(self.players.len() < MAX_PLAYERS, LotteryError::LotteryFull);
        Ok(())
    }

    /// Appends a player that already passed `check_entry`.
    pub fn record_entry(&mut self, player: Pubkey) {
        self.players.push(player);
    }

    pub fn upkeep_status(&self, interval: i64, pool_balance: u64, now: i64) -> UpkeepStatus {
        let elapsed = now.saturating_sub(self.latest_timestamp);

        let is_open = self.is_open();
        let has_players = !self.players.is_empty();
        let has_balance = pool_balance > 0;
        let time_passed = elapsed >= interval;

        UpkeepStatus {
            upkeep_needed: is_open && has_players && has_balance && time_passed,
            is_open,
            has_players,
            has_balance,
            time_passed,
            player_count: self.number_of_players(),
            pool_balance,
            elapsed,
        }
    }

    /// Re-checks the draw conditions, issues a randomness request through
    /// `request` and moves the round to Calculating.
    pub fn close_round<F>(
        &mut self,
        interval: i64,
        pool_balance: u64,
        now: i64,
        request: F,
    ) -> Result<[u8; 32]>
    where
        F: FnOnce(&mut Self) -> Result<[u8; 32]>,
    {
        let status = self.upkeep_status(interval, pool_balance, now);
        if !status.upkeep_needed {
            msg!("upkeep not needed: {:?}", status);
            return err!(LotteryError::CloseNotEligible);
        }

        let request_id = request(self)?;

        self.pending_request = Some(request_id);
        self.state = LotteryState::Calculating;

        Ok(request_id)
    }

    /// validate -> payout -> commit.
    ///
    /// `payout` receives the lottery as it stands before any reset, so anything
    /// it triggers still observes Calculating. If it fails, nothing changes.
    pub fn fulfill<F>(
        &mut self,
        request_id: [u8; 32],
        random_words: &[u64],
        pool_balance: u64,
        now: i64,
        payout: F,
    ) -> Result<Fulfillment>
    where
        F: FnOnce(&Self, Pubkey, u64) -> Result<()>,
    {
        if self.state != LotteryState::Calculating || self.pending_request != Some(request_id) {
            msg!("dropping fulfillment for unknown request {:?}", request_id);
            return err!(LotteryError::UnknownRequest);
        }

        let first_word = *random_words.first().ok_or(LotteryError::EmptyRandomWords)?;
        let index = winner_index(first_word, self.players.len()).ok_or(LotteryError::IndexOutOfRange)?;
        let winner = self.players[index];
        let rounds_completed = self
            .rounds_completed
            .checked_add(1)
            .ok_or(LotteryError::MathOverflow)?;

        payout(self, winner, pool_balance).map_err(|e| {
            msg!("payout of {} lamports to {} failed: {}", pool_balance, winner, e);
            error!(LotteryError::PayoutFailed)
        })?;

        // commit state
        self.recent_winner = Some(winner);
        self.latest_timestamp = now;
        self.players.clear();
        self.pending_request = None;
        self.state = LotteryState::Open;
        self.rounds_completed = rounds_completed;

        Ok(Fulfillment {
            winner,
            winner_index: index as u32,
            payout: pool_balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use crate::constants::{DEFAULT_ENTRANCE_FEE_LAMPORTS, DEFAULT_INTERVAL_SECONDS};

    const FEE: u64 = DEFAULT_ENTRANCE_FEE_LAMPORTS;
    const INTERVAL: i64 = DEFAULT_INTERVAL_SECONDS;
    const START: i64 = 1_700_000_000;
    const REQUEST: [u8; 32] = [7u8; 32];

    fn code(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => e.error_code_number,
            Error::ProgramError(e) => panic!("unexpected program error: {:?}", e),
        }
    }

    fn expect_err<T: std::fmt::Debug>(res: Result<T>, expected: LotteryError) {
        let err = res.expect_err("operation should fail");
        assert_eq!(code(err), u32::from(expected));
    }

    fn fresh_lottery() -> Lottery {
        Lottery {
            latest_timestamp: START,
            request_nonce: 1,
            ..Default::default()
        }
    }

    fn enter(lottery: &mut Lottery, player: Pubkey) {
        lottery.check_entry(FEE, FEE).expect("entry should be accepted");
        lottery.record_entry(player);
    }

    fn pool_of(lottery: &Lottery) -> u64 {
        FEE * lottery.players.len() as u64
    }

    fn close(lottery: &mut Lottery) -> [u8; 32] {
        let pool = pool_of(lottery);
        lottery
            .close_round(INTERVAL, pool, START + INTERVAL + 1, |_| Ok(REQUEST))
            .expect("round should close")
    }

    #[test]
    fn entry_below_stake_fails_in_any_state() {
        let mut lottery = fresh_lottery();
        for state in [LotteryState::Open, LotteryState::Calculating] {
            lottery.state = state;
            expect_err(lottery.check_entry(FEE - 1, FEE), LotteryError::InsufficientStake);
            expect_err(lottery.check_entry(0, FEE), LotteryError::InsufficientStake);
        }
    }

    #[test]
    fn entry_while_calculating_fails_regardless_of_amount() {
        let mut lottery = fresh_lottery();
        enter(&mut lottery, Pubkey::new_unique());
        close(&mut lottery);

        for amount in [FEE, FEE * 10, u64::MAX] {
            expect_err(lottery.check_entry(amount, FEE), LotteryError::RoundNotOpen);
        }
        assert_eq!(lottery.number_of_players(), 1);
    }

    #[test]
    fn entries_are_recorded_in_arrival_order() {
        let mut lottery = fresh_lottery();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        enter(&mut lottery, a);
        enter(&mut lottery, b);

        assert_eq!(lottery.player(0).unwrap(), a);
        assert_eq!(lottery.player(1).unwrap(), b);
        assert_eq!(lottery.number_of_players(), 2);
        expect_err(lottery.player(2), LotteryError::IndexOutOfRange);
    }

    #[test]
    fn same_player_may_enter_twice() {
        let mut lottery = fresh_lottery();
        let a = Pubkey::new_unique();
        enter(&mut lottery, a);
        enter(&mut lottery, a);
        assert_eq!(lottery.number_of_players(), 2);
    }

    #[test]
    fn registry_is_bounded() {
        let mut lottery = fresh_lottery();
        for _ in 0..MAX_PLAYERS {
            enter(&mut lottery, Pubkey::new_unique());
        }
        expect_err(lottery.check_entry(FEE, FEE), LotteryError::LotteryFull);
    }

    #[test]
    fn upkeep_is_the_and_of_four_conditions() {
        let mut lottery = fresh_lottery();
        enter(&mut lottery, Pubkey::new_unique());
        let later = START + INTERVAL;

        let all = lottery.upkeep_status(INTERVAL, FEE, later);
        assert!(all.upkeep_needed);
        assert!(all.is_open && all.has_players && all.has_balance && all.time_passed);
        assert_eq!(all.elapsed, INTERVAL);

        // elapsed < interval
        let early = lottery.upkeep_status(INTERVAL, FEE, later - 1);
        assert!(!early.upkeep_needed);
        assert!(!early.time_passed);

        // balance == 0
        let broke = lottery.upkeep_status(INTERVAL, 0, later);
        assert!(!broke.upkeep_needed);
        assert!(!broke.has_balance);

        // state != Open
        lottery.state = LotteryState::Calculating;
        let busy = lottery.upkeep_status(INTERVAL, FEE, later);
        assert!(!busy.upkeep_needed);
        assert!(!busy.is_open);

        // count == 0
        let empty = fresh_lottery().upkeep_status(INTERVAL, FEE, later);
        assert!(!empty.upkeep_needed);
        assert!(!empty.has_players);
        assert_eq!(empty.player_count, 0);
    }

    #[test]
    fn close_round_when_not_eligible_stays_open() {
        let mut lottery = fresh_lottery();
        enter(&mut lottery, Pubkey::new_unique());

        let mut requested = false;
        let res = lottery.close_round(INTERVAL, FEE, START + INTERVAL - 1, |_| {
            requested = true;
            Ok(REQUEST)
        });

        expect_err(res, LotteryError::CloseNotEligible);
        assert!(!requested);
        assert_eq!(lottery.state(), LotteryState::Open);
        assert_eq!(lottery.pending_request(), None);
    }

    #[test]
    fn close_round_when_eligible_moves_to_calculating() {
        let mut lottery = fresh_lottery();
        enter(&mut lottery, Pubkey::new_unique());

        let request_id = close(&mut lottery);

        assert_ne!(request_id, [0u8; 32]);
        assert_eq!(lottery.state(), LotteryState::Calculating);
        assert_eq!(lottery.pending_request(), Some(request_id));

        // a second close is blocked by the state gate
        let res = lottery.close_round(INTERVAL, FEE, START + 10 * INTERVAL, |_| Ok([9u8; 32]));
        expect_err(res, LotteryError::CloseNotEligible);
        assert_eq!(lottery.pending_request(), Some(request_id));
    }

    #[test]
    fn failed_request_leaves_round_open() {
        let mut lottery = fresh_lottery();
        enter(&mut lottery, Pubkey::new_unique());

        let res = lottery.close_round(INTERVAL, FEE, START + INTERVAL, |_| {
            err!(LotteryError::MathOverflow)
        });

        assert!(res.is_err());
        assert_eq!(lottery.state(), LotteryState::Open);
        assert_eq!(lottery.pending_request(), None);
    }

    #[test]
    fn unknown_request_is_dropped_without_state_change() {
        let mut lottery = fresh_lottery();
        enter(&mut lottery, Pubkey::new_unique());
        let request_id = close(&mut lottery);
        let before = lottery.clone();

        let res = lottery.fulfill([1u8; 32], &[3], FEE, START + 100, |_, _, _| Ok(()));

        expect_err(res, LotteryError::UnknownRequest);
        assert_eq!(lottery.state(), LotteryState::Calculating);
        assert_eq!(lottery.pending_request(), Some(request_id));
        assert_eq!(lottery.players, before.players);
        assert_eq!(lottery.recent_winner(), None);
    }

    #[test]
    fn fulfillment_while_open_is_unknown() {
        let mut lottery = fresh_lottery();
        enter(&mut lottery, Pubkey::new_unique());

        let res = lottery.fulfill(REQUEST, &[3], FEE, START + 100, |_, _, _| Ok(()));
        expect_err(res, LotteryError::UnknownRequest);
        assert_eq!(lottery.state(), LotteryState::Open);
    }

    #[test]
    fn empty_random_words_are_rejected() {
        let mut lottery = fresh_lottery();
        enter(&mut lottery, Pubkey::new_unique());
        let request_id = close(&mut lottery);

        let res = lottery.fulfill(request_id, &[], FEE, START + 100, |_, _, _| Ok(()));
        expect_err(res, LotteryError::EmptyRandomWords);
        assert_eq!(lottery.pending_request(), Some(request_id));
    }

    #[test]
    fn single_player_round_pays_the_whole_pool() {
        let mut lottery = fresh_lottery();
        let only = Pubkey::new_unique();
        enter(&mut lottery, only);
        let request_id = close(&mut lottery);
        let closed_at = START + 200;

        let mut paid = None;
        let outcome = lottery
            .fulfill(request_id, &[123_456_789], FEE, closed_at, |_, to, amount| {
                paid = Some((to, amount));
                Ok(())
            })
            .unwrap();

        assert_eq!(paid, Some((only, FEE)));
        assert_eq!(outcome.winner, only);
        assert_eq!(outcome.winner_index, 0);
        assert_eq!(outcome.payout, 100_000_000);
        assert_eq!(lottery.recent_winner(), Some(only));
        assert_eq!(lottery.number_of_players(), 0);
        assert_eq!(lottery.state(), LotteryState::Open);
        assert_eq!(lottery.pending_request(), None);
        assert_eq!(lottery.latest_timestamp(), closed_at);
        assert_eq!(lottery.rounds_completed, 1);
    }

    #[test]
    fn four_player_round_picks_word_mod_count() {
        let mut lottery = fresh_lottery();
        let players: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        for p in &players {
            enter(&mut lottery, *p);
        }
        let pool = pool_of(&lottery);
        let request_id = close(&mut lottery);

        let mut paid = None;
        let outcome = lottery
            .fulfill(request_id, &[7], pool, START + 200, |_, to, amount| {
                paid = Some((to, amount));
                Ok(())
            })
            .unwrap();

        assert_eq!(outcome.winner_index, 3);
        assert_eq!(outcome.winner, players[3]);
        assert_eq!(paid, Some((players[3], 400_000_000)));
        assert_eq!(lottery.number_of_players(), 0);
        expect_err(lottery.player(0), LotteryError::IndexOutOfRange);
    }

    #[test]
    fn consumed_request_cannot_be_replayed() {
        let mut lottery = fresh_lottery();
        let winner = Pubkey::new_unique();
        enter(&mut lottery, winner);
        let request_id = close(&mut lottery);

        lottery
            .fulfill(request_id, &[0], FEE, START + 200, |_, _, _| Ok(()))
            .unwrap();

        let mut paid_again = false;
        let res = lottery.fulfill(request_id, &[0], FEE, START + 300, |_, _, _| {
            paid_again = true;
            Ok(())
        });

        expect_err(res, LotteryError::UnknownRequest);
        assert!(!paid_again);
        assert_eq!(lottery.latest_timestamp(), START + 200);
    }

    #[test]
    fn failed_payout_changes_nothing_and_can_be_retried() {
        let mut lottery = fresh_lottery();
        let players: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        for p in &players {
            enter(&mut lottery, *p);
        }
        let pool = pool_of(&lottery);
        let request_id = close(&mut lottery);
        let before = lottery.clone();

        let res = lottery.fulfill(request_id, &[4], pool, START + 200, |_, _, _| {
            err!(LotteryError::Unauthorized)
        });

        expect_err(res, LotteryError::PayoutFailed);
        assert_eq!(lottery.state(), LotteryState::Calculating);
        assert_eq!(lottery.pending_request(), Some(request_id));
        assert_eq!(lottery.players, before.players);
        assert_eq!(lottery.recent_winner(), None);
        assert_eq!(lottery.latest_timestamp(), START);
        assert_eq!(lottery.rounds_completed, 0);

        let outcome = lottery
            .fulfill(request_id, &[4], pool, START + 250, |_, _, _| Ok(()))
            .unwrap();
        assert_eq!(outcome.winner, players[1]);
        assert_eq!(lottery.state(), LotteryState::Open);
    }

    #[test]
    fn calls_made_during_payout_observe_calculating() {
        let mut lottery = fresh_lottery();
        enter(&mut lottery, Pubkey::new_unique());
        enter(&mut lottery, Pubkey::new_unique());
        let pool = pool_of(&lottery);
        let request_id = close(&mut lottery);

        lottery
            .fulfill(request_id, &[1], pool, START + 200, |seen, _, _| {
                assert_eq!(seen.state(), LotteryState::Calculating);
                assert_eq!(seen.pending_request(), Some(request_id));
                assert_eq!(seen.number_of_players(), 2);
                expect_err(seen.check_entry(FEE, FEE), LotteryError::RoundNotOpen);
                assert!(!seen.upkeep_status(INTERVAL, pool, START + 10 * INTERVAL).upkeep_needed);
                Ok(())
            })
            .unwrap();

        assert_eq!(lottery.state(), LotteryState::Open);
    }

    #[test]
    fn next_round_waits_for_a_full_interval() {
        let mut lottery = fresh_lottery();
        enter(&mut lottery, Pubkey::new_unique());
        let request_id = close(&mut lottery);
        let closed_at = START + 200;
        lottery
            .fulfill(request_id, &[0], FEE, closed_at, |_, _, _| Ok(()))
            .unwrap();

        enter(&mut lottery, Pubkey::new_unique());
        assert!(!lottery.upkeep_status(INTERVAL, FEE, closed_at + INTERVAL - 1).upkeep_needed);
        assert!(lottery.upkeep_status(INTERVAL, FEE, closed_at + INTERVAL).upkeep_needed);
    }
}
