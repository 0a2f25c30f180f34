//! Snapshot store database schema.

/// SQL to create the snapshots table.
pub const CREATE_GAME_SNAPSHOTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS game_snapshots (
    name     VARCHAR(255) PRIMARY KEY,
    payload  JSONB NOT NULL,
    saved_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";
