//! Leaderboard documents fetched from adventofcode.com

use aoc_http_client::AocClient;
use aoc_tiles::{BoxError, LeaderboardSource};
use zeroize::Zeroizing;

/// [`LeaderboardSource`] backed by the personal leaderboard page
pub struct HttpLeaderboardSource {
    client: AocClient,
    session: Zeroizing<String>,
}

impl HttpLeaderboardSource {
    pub fn new(client: AocClient, session: Zeroizing<String>) -> Self {
        Self { client, session }
    }
}

impl LeaderboardSource for HttpLeaderboardSource {
    fn fetch(&self, year: u16) -> Result<String, BoxError> {
        log::info!("Fetching {} leaderboard", year);
        Ok(self.client.get_leaderboard(year, &self.session)?)
    }
}
