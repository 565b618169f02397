use anyhow::Context as _;
use oracle::Connection;
use tracing::debug;

use crate::errors::{Error, Result};

pub struct OracleClient {
    pub conn: Connection,
}

impl OracleClient {
    pub fn connect(username: &str, password: &str, connect_string: &str) -> Result<Self> {
        let conn = Connection::connect(username, password, connect_string)
            .context(format!(
                "Failed to connect to Oracle database with username '{}' and connect string '{}' (password is hidden)",
                username, connect_string
            ))
            .map_err(Error::Database)?;
        Ok(Self { conn })
    }

    pub fn execute(&self, sql: &str) -> Result<()> {
        debug!("Executing Oracle statement");
        self.conn
            .execute(sql, &[])
            .context("Oracle rejected the statement")
            .map_err(Error::Database)?;
        Ok(())
    }

    pub fn ping(&self) -> Result<()> {
        self.conn
            .query_row("select 1 from dual", &[])
            .context("Failed to execute probe query on Oracle database")
            .map_err(Error::Database)?;
        Ok(())
    }
}
