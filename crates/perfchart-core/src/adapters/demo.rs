use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use time::{Date, OffsetDateTime, Weekday};

use crate::data_source::{DataSource, SourceError};
use crate::domain::format_calendar_date;
use crate::{
    AssetDescriptor, AssetSeries, AssetsInfo, Observation, PerformanceSnapshot, Timeframe,
    ValidationError,
};

const CRYPTO_BASE_PRICE: f64 = 45_000.0;
const TRADITIONAL_BASE_PRICE: f64 = 100.0;
const RETURN_FLOOR: f64 = -95.0;

/// Offline source producing deterministic synthetic series.
///
/// The crypto basket trades every calendar day; the 60/40 portfolio only on
/// weekdays, so the two sides differ in length and drift apart in dates the
/// same way live data does.
#[derive(Debug, Clone)]
pub struct DemoAdapter {
    anchor: Date,
    seed: u64,
    latency: Duration,
}

impl Default for DemoAdapter {
    fn default() -> Self {
        Self {
            anchor: OffsetDateTime::now_utc().date(),
            seed: 0x5eed_cafe,
            latency: Duration::ZERO,
        }
    }
}

impl DemoAdapter {
    /// Series end the day before `anchor`.
    pub fn with_anchor(anchor: Date) -> Self {
        Self {
            anchor,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Simulated round trip for a one-year request; other windows scale with
    /// their lookback.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Saturates at `Duration::MAX` for absurd configured latencies.
    pub fn latency_for(&self, timeframe: Timeframe) -> Duration {
        self.latency
            .checked_mul(u32::from(timeframe.lookback_days()))
            .map_or(Duration::MAX, |scaled| scaled / 365)
    }

    pub fn snapshot(&self, timeframe: Timeframe) -> Result<PerformanceSnapshot, ValidationError> {
        let days = i64::from(timeframe.lookback_days());
        let mut crypto = Vec::with_capacity(days as usize);
        let mut traditional = Vec::with_capacity(days as usize);
        let mut crypto_walk = Walk::new(CRYPTO_BASE_PRICE, -4.0, 4.4, self.seed);
        let mut traditional_walk =
            Walk::new(TRADITIONAL_BASE_PRICE, -0.6, 0.7, self.seed.rotate_left(17));

        for index in 0..days {
            let date = self.anchor - time::Duration::days(days - index);
            let label = format_calendar_date(date);

            crypto.push(crypto_walk.step(&label)?);
            if !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) {
                traditional.push(traditional_walk.step(&label)?);
            }
        }

        Ok(PerformanceSnapshot::new(crypto, traditional).with_timeframe(timeframe))
    }
}

impl DataSource for DemoAdapter {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn assets_info<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<AssetsInfo, SourceError>> + Send + 'a>> {
        Box::pin(async move { Ok(demo_assets_info()) })
    }

    fn performance<'a>(
        &'a self,
        timeframe: Timeframe,
    ) -> Pin<Box<dyn Future<Output = Result<PerformanceSnapshot, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let latency = self.latency_for(timeframe);
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            self.snapshot(timeframe)
                .map_err(|error| SourceError::decode(format!("demo series invalid: {error}")))
        })
    }
}

fn demo_assets_info() -> AssetsInfo {
    AssetsInfo {
        crypto: AssetDescriptor {
            name: String::from("Crypto Top 10"),
            symbol: Some(String::from("TOP10")),
            description: String::from(
                "Equal-weighted basket of the ten largest cryptocurrencies by market cap",
            ),
            color: Some(String::from("#f7931a")),
        },
        traditional: AssetDescriptor {
            name: String::from("60/40 Portfolio"),
            symbol: None,
            description: String::from("60% S&P 500 (SPY) + 40% 20+ Year Treasury Bonds (TLT)"),
            color: Some(String::from("#3b82f6")),
        },
    }
}

/// Cumulative random walk in percent with a floor so prices stay positive.
///
/// Each side owns its own seeded stream, so skipping weekend steps on one
/// side never shifts the other.
struct Walk {
    base_price: f64,
    low: f64,
    high: f64,
    cumulative: f64,
    rng: fastrand::Rng,
}

impl Walk {
    fn new(base_price: f64, low: f64, high: f64, seed: u64) -> Self {
        Self {
            base_price,
            low,
            high,
            cumulative: 0.0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    fn step(&mut self, date: &str) -> Result<Observation, ValidationError> {
        let noise = self.rng.f64();
        self.cumulative = (self.cumulative + self.low + (self.high - self.low) * noise)
            .max(RETURN_FLOOR);
        let price = self.base_price * (1.0 + self.cumulative / 100.0);
        Observation::new(date, self.cumulative, price)
    }
}
