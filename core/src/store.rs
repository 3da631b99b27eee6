//! SQLite persistence of finished runs.
//!
//! RULE: Only store.rs talks to the database.
//! The simulation itself never touches the store; the runner saves
//! an Outlook after the engine returns it.

use rusqlite::{params, Connection};

use crate::{
    config::SimConfig,
    error::SimResult,
    outlook::{Outlook, TeamOutlook},
    types::RunId,
};

pub struct ResultStore {
    conn: Connection,
}

impl ResultStore {
    /// Open (or create) the results database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_results.sql"))?;
        Ok(())
    }

    // ── Run ────────────────────────────────────────────────────

    /// Register a run and return its freshly generated id.
    pub fn insert_run(&self, config: &SimConfig, goal_model: &str, version: &str) -> SimResult<RunId> {
        let run_id = uuid::Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO run (run_id, seed, iterations, workers, zone_kind, spots, goal_model, version, started_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                run_id,
                config.seed as i64,
                config.iterations as i64,
                config.workers as i64,
                config.zone.kind(),
                config.zone.spots() as i64,
                goal_model,
                version,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(run_id)
    }

    pub fn run_count(&self) -> SimResult<i64> {
        let n = self.conn.query_row("SELECT COUNT(*) FROM run", [], |row| row.get(0))?;
        Ok(n)
    }

    // ── Outlooks ───────────────────────────────────────────────

    pub fn save_outlook(&mut self, run_id: &str, outlook: &Outlook) -> SimResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO team_outlook (run_id, standing, team, relegation, positions_json)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (standing, team) in outlook.teams.iter().enumerate() {
                stmt.execute(params![
                    run_id,
                    standing as i64,
                    team.name,
                    team.relegation,
                    serde_json::to_string(&team.positions)?,
                ])?;
            }
        }
        tx.commit()?;
        log::debug!("saved {} team outlooks for run {run_id}", outlook.teams.len());
        Ok(())
    }

    /// Stored outlooks for a run, in standings input order.
    pub fn outlook_for_run(&self, run_id: &str) -> SimResult<Vec<TeamOutlook>> {
        let mut stmt = self.conn.prepare(
            "SELECT team, relegation, positions_json FROM team_outlook
             WHERE run_id = ?1 ORDER BY standing ASC",
        )?;
        let rows = stmt
            .query_map(params![run_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?, row.get::<_, String>(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(name, relegation, positions_json)| -> SimResult<TeamOutlook> {
                Ok(TeamOutlook {
                    name,
                    relegation,
                    positions: serde_json::from_str(&positions_json)?,
                })
            })
            .collect()
    }
}
