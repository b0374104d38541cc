//! Redis implementation of the record store.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use serde_json::json;
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::info;

use super::bounded;
use crate::domain::entities::Record;
use crate::domain::repositories::RecordStore;
use crate::error::AppError;

/// Writes the record hash only if the key does not exist yet.
static INSERT_IF_ABSENT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
        if redis.call('EXISTS', KEYS[1]) == 1 then
            return 0
        end
        redis.call('HSET', KEYS[1],
            'short_code', ARGV[1],
            'long_url', ARGV[2],
            'created_at', ARGV[3],
            'clicks', ARGV[4],
            'custom', ARGV[5])
        return 1
        ",
    )
});

/// Adds to `clicks` on an existing hash; returns -1 when the key is missing.
static INCREMENT_CLICKS: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
        if redis.call('EXISTS', KEYS[1]) == 0 then
            return -1
        end
        return redis.call('HINCRBY', KEYS[1], 'clicks', ARGV[1])
        ",
    )
});

/// Record store keeping one Redis hash per short code.
///
/// Keys are `{namespace}:{code}`; hash fields are `short_code`, `long_url`,
/// `created_at` (RFC 3339), `clicks` and `custom`. Conditional inserts and
/// increments run as Lua scripts, so each is a single atomic step on the
/// server.
pub struct RedisRecordStore {
    conn: ConnectionManager,
    namespace: String,
    timeout: Duration,
}

impl RedisRecordStore {
    /// Connects to Redis and checks the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the server cannot be reached
    /// within `timeout`.
    pub async fn connect(
        redis_url: &str,
        namespace: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url)?;
        let conn = bounded(timeout, "connect", async {
            Ok::<_, AppError>(ConnectionManager::new(client).await?)
        })
        .await?;

        let store = Self {
            conn,
            namespace: namespace.into(),
            timeout,
        };
        store.ping().await?;

        info!("Connected to Redis");
        Ok(store)
    }

    fn build_key(&self, code: &str) -> String {
        format!("{}:{}", self.namespace, code)
    }
}

/// Flattens a record into hash field/value pairs.
fn encode_record(record: &Record) -> [(&'static str, String); 5] {
    [
        ("short_code", record.short_code.clone()),
        ("long_url", record.long_url.clone()),
        (
            "created_at",
            record.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ),
        ("clicks", record.clicks.to_string()),
        ("custom", record.custom.to_string()),
    ]
}

/// Rebuilds a record from `HGETALL` output. An empty map means no record.
fn decode_record(code: &str, mut fields: HashMap<String, String>) -> Result<Option<Record>, AppError> {
    if fields.is_empty() {
        return Ok(None);
    }

    let corrupt = |field: &str| {
        AppError::internal(
            "Stored record is malformed",
            json!({ "code": code, "field": field }),
        )
    };

    let long_url = fields.remove("long_url").ok_or_else(|| corrupt("long_url"))?;

    let created_at = fields
        .get("created_at")
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| corrupt("created_at"))?;

    let clicks = fields
        .get("clicks")
        .and_then(|v| v.parse::<u64>().ok())
        .ok_or_else(|| corrupt("clicks"))?;

    let custom = match fields.get("custom").map(String::as_str) {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") | None => false,
        Some(_) => return Err(corrupt("custom")),
    };

    Ok(Some(Record {
        short_code: fields
            .remove("short_code")
            .unwrap_or_else(|| code.to_string()),
        long_url,
        created_at,
        clicks,
        custom,
    }))
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn put(&self, record: Record) -> Result<(), AppError> {
        let key = self.build_key(&record.short_code);
        let fields = encode_record(&record);
        let mut conn = self.conn.clone();

        bounded(self.timeout, "put", async {
            let _: () = conn.hset_multiple(&key, &fields[..]).await?;
            Ok::<_, AppError>(())
        })
        .await
    }

    async fn insert_if_absent(&self, record: Record) -> Result<bool, AppError> {
        let key = self.build_key(&record.short_code);
        let [short_code, long_url, created_at, clicks, custom] = encode_record(&record);
        let mut conn = self.conn.clone();

        bounded(self.timeout, "insert_if_absent", async {
            let inserted: i64 = INSERT_IF_ABSENT
                .key(&key)
                .arg(short_code.1)
                .arg(long_url.1)
                .arg(created_at.1)
                .arg(clicks.1)
                .arg(custom.1)
                .invoke_async(&mut conn)
                .await?;
            Ok::<_, AppError>(inserted == 1)
        })
        .await
    }

    async fn get(&self, code: &str) -> Result<Option<Record>, AppError> {
        let key = self.build_key(code);
        let mut conn = self.conn.clone();

        let fields = bounded(self.timeout, "get", async {
            let fields: HashMap<String, String> = conn.hgetall(&key).await?;
            Ok::<_, AppError>(fields)
        })
        .await?;

        decode_record(code, fields)
    }

    async fn increment_clicks(&self, code: &str, delta: u64) -> Result<(), AppError> {
        let key = self.build_key(code);
        let mut conn = self.conn.clone();

        let clicks = bounded(self.timeout, "increment_clicks", async {
            let clicks: i64 = INCREMENT_CLICKS
                .key(&key)
                .arg(delta)
                .invoke_async(&mut conn)
                .await?;
            Ok::<_, AppError>(clicks)
        })
        .await?;

        if clicks < 0 {
            return Err(AppError::code_not_found(code));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();

        bounded(self.timeout, "ping", async {
            let _: () = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, AppError>(())
        })
        .await
    }
}
