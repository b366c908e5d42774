use soroban_sdk::{contracttype, Address, Vec};

// ─── Lock state ────────────────────────────────────────────────────────────

/// A participant's escrowed balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lock {
    /// Raw amount of lock token held for the participant.
    pub amount: i128,
    /// Week-aligned timestamp at which voting power reaches zero.
    pub unlock_time: u64,
}

/// A point on a piecewise-linear voting power curve.
///
/// `bias` and `slope` are stored multiplied by `MAX_LOCK_TIME`, so a lock of
/// `amount` ending at `end` contributes `slope = amount` and
/// `bias = amount * (end - timestamp)`.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Checkpoint {
    pub timestamp: u64,
    pub bias: i128,
    pub slope: i128,
}

// ─── Reward state ──────────────────────────────────────────────────────────

/// Global reward accumulator.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardState {
    /// Sum of all lock amounts, undecayed. Pro-rata denominator.
    pub total_locked: i128,
    /// Cumulative reward per locked unit, scaled by `REWARD_SCALE`.
    pub reward_per_unit_stored: i128,
    /// Timestamp of the last distribution into the accumulator.
    pub last_update_time: u64,
}

/// Per-participant snapshot of the accumulator.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserReward {
    pub reward_per_unit_paid: i128,
    /// Banked rewards not yet claimed.
    pub accrued: i128,
}

// ─── Distribution funds ────────────────────────────────────────────────────

/// Share-token balances owed by the contract.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DistributionFunds {
    /// Awaiting withdrawal by the operations address. Reset on withdrawal.
    pub operations_fund: i128,
    /// Cumulative amount ever routed to the reward pool. Never decreases.
    pub total_rewarded: i128,
    /// Cumulative amount ever paid out of the reward pool. Never decreases.
    pub withdrawn_reward: i128,
    /// Pool proceeds that arrived while nothing was locked.
    pub unallocated: i128,
}

impl DistributionFunds {
    /// Reward pool balance still held for claims or sweeps.
    pub fn reward_outstanding(&self) -> i128 {
        self.total_rewarded - self.withdrawn_reward
    }
}

// ─── Configuration ─────────────────────────────────────────────────────────

/// How reward-pool proceeds leave the contract.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewardPolicy {
    /// Lockers claim pro-rata to their locked amount. The community sweep
    /// only moves unallocated proceeds.
    ProRata,
    /// No per-locker claims. The admin sweeps the whole pool to a recipient.
    CommunitySweep,
}

/// Split applied to every conversion output.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionConfig {
    /// Fixed recipient of the operations fund.
    pub operations: Address,
    /// Operations share in basis points.
    pub operations_bps: u32,
    /// Reward pool share in basis points.
    pub pool_bps: u32,
    pub policy: RewardPolicy,
}

// ─── Routing ───────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RouteKind {
    /// Exactly one hop between two tokens.
    Direct,
    /// Any number of hops along `path`.
    MultiHop,
}

/// Hop sequence handed to the exchange router, XDR encoded.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapRoute {
    pub kind: RouteKind,
    pub path: Vec<Address>,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract admin address.
    Admin,
    /// Token that participants lock.
    LockToken,
    /// Token the conversion pool accrues in.
    ShareToken,
    /// Exchange router contract.
    Router,
    /// DistributionConfig.
    DistConfig,
    /// DistributionFunds singleton.
    Funds,
    /// RewardState singleton.
    Rewards,
    /// Set while a conversion is calling out to the router.
    Converting,
    /// Per-participant lock.
    Lock(Address),
    /// Per-participant reward snapshot.
    UserReward(Address),
    /// Number of checkpoints recorded for a participant.
    UserPointCount(Address),
    /// Participant checkpoint by index.
    UserPoint(Address, u32),
    /// Number of global checkpoints.
    GlobalPointCount,
    /// Global checkpoint by index.
    GlobalPoint(u32),
    /// Scheduled slope delta at a week-aligned timestamp.
    SlopeChange(u64),
}
