//! Star counting rules and display options

/// Maximum stars per day (two parts)
pub const MAX_STARS: u8 = 2;

/// Rule deciding when a part counts as solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolvedWhen {
    /// Only the leaderboard counts
    OnLeaderboard,
    /// Only local solution files count
    FileExists,
    /// Leaderboard or local files, whichever shows more
    Either,
    /// Leaderboard and local files, whichever shows less
    Both,
}

impl SolvedWhen {
    /// Resolve the `auto` choice: `Both` with leaderboard access, else `FileExists`
    pub fn resolve(choice: Option<SolvedWhen>, has_session: bool) -> Self {
        choice.unwrap_or(if has_session {
            SolvedWhen::Both
        } else {
            SolvedWhen::FileExists
        })
    }

    /// Stars for a day from the leaderboard's ranked parts and the local file count
    ///
    /// Local files are capped at [`MAX_STARS`] since there are only two parts.
    pub fn decide(self, ranked_parts: u8, local_files: usize) -> u8 {
        let on_leaderboard = ranked_parts.min(MAX_STARS);
        let file_exists = u8::try_from(local_files).map_or(MAX_STARS, |n| n.min(MAX_STARS));
        match self {
            SolvedWhen::OnLeaderboard => on_leaderboard,
            SolvedWhen::FileExists => file_exists,
            SolvedWhen::Either => on_leaderboard.max(file_exists),
            SolvedWhen::Both => on_leaderboard.min(file_exists),
        }
    }

    /// Whether the rule reads the leaderboard
    pub fn needs_leaderboard(self) -> bool {
        !matches!(self, SolvedWhen::FileExists)
    }
}

/// What a tile shows on its right side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RightSide {
    /// A checkmark per solved part
    Checkmark,
    /// Leaderboard time and rank per part
    TimeAndRank,
    /// Measured runtime per part
    Runtime,
}

impl RightSide {
    /// Resolve the `auto` choice: `TimeAndRank` with leaderboard access, else `Checkmark`
    pub fn resolve(choice: Option<RightSide>, has_session: bool) -> Self {
        choice.unwrap_or(if has_session {
            RightSide::TimeAndRank
        } else {
            RightSide::Checkmark
        })
    }

    pub fn needs_leaderboard(self) -> bool {
        matches!(self, RightSide::TimeAndRank | RightSide::Runtime)
    }
}

/// When to add the all-years total header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShowTotals {
    No,
    /// Only with data for at least [`ShowTotals::AUTO_MIN_YEARS`] years
    #[default]
    Auto,
    Yes,
}

impl ShowTotals {
    pub const AUTO_MIN_YEARS: usize = 3;

    pub fn shows(self, years_with_data: usize) -> bool {
        match self {
            ShowTotals::No => false,
            ShowTotals::Auto => years_with_data >= Self::AUTO_MIN_YEARS,
            ShowTotals::Yes => true,
        }
    }
}

/// Fully resolved composition options; never holds an `auto` choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileOptions {
    pub solved_when: SolvedWhen,
    pub right_side: RightSide,
}

impl TileOptions {
    /// Resolve `auto` choices (given as `None`) once against session availability
    pub fn resolve(
        solved_when: Option<SolvedWhen>,
        right_side: Option<RightSide>,
        has_session: bool,
    ) -> Self {
        Self {
            solved_when: SolvedWhen::resolve(solved_when, has_session),
            right_side: RightSide::resolve(right_side, has_session),
        }
    }

    /// Whether the leaderboard has to be fetched
    pub fn needs_leaderboard(&self) -> bool {
        self.solved_when.needs_leaderboard() || self.right_side.needs_leaderboard()
    }

    /// Whether leaderboard times are replaced by runtimes
    pub fn uses_runtime(&self) -> bool {
        self.right_side == RightSide::Runtime
    }
}
