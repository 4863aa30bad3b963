use chrono::{TimeZone, Utc};
use core_types::{Interval, Kline, Symbol};
use num_traits::cast::ToPrimitive;
use strategies::Strategy;

/// The target weight a strategy asked for at one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationStep {
    pub open_time: i64,
    pub close: f64,
    pub weight: f64,
}

/// Summary of a walk-forward replay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplayReport {
    pub steps: Vec<AllocationStep>,
    /// Number of flat-to-invested transitions.
    pub entries: u32,
    /// Number of invested-to-flat transitions.
    pub exits: u32,
    /// Fraction of steps spent invested.
    pub exposure: f64,
    pub strategy_return: f64,
    pub buy_and_hold_return: f64,
}

/// Replays a bar history through a strategy one step at a time.
pub struct Backtester {
    /// The symbol whose weight is tracked.
    pub symbol: Symbol,
    /// The timeframe the strategy trades on.
    pub interval: Interval,
    strategy: Box<dyn Strategy + Send + Sync>,
    /// When set, the strategy only sees the trailing `history_size` bars.
    history_size: Option<usize>,
}

impl Backtester {
    pub fn new(
        strategy: Box<dyn Strategy + Send + Sync>,
        history_size: Option<usize>,
    ) -> anyhow::Result<Self> {
        let symbol = match strategy.assets().first() {
            Some(symbol) => symbol.clone(),
            None => anyhow::bail!("Strategy {} declares no assets to replay.", strategy.name()),
        };
        if history_size == Some(0) {
            anyhow::bail!("History size must be greater than 0.");
        }

        Ok(Self {
            symbol,
            interval: strategy.interval(),
            strategy,
            history_size,
        })
    }

    pub fn run(&self, klines: &[Kline]) -> ReplayReport {
        tracing::info!(
            symbol = %self.symbol,
            interval = %self.interval,
            strategy = self.strategy.name(),
            bars = klines.len(),
            "Starting replay."
        );

        let mut steps = Vec::with_capacity(klines.len());
        for (i, current_kline) in klines.iter().enumerate() {
            let start = self
                .history_size
                .map_or(0, |size| (i + 1).saturating_sub(size));
            let history_slice = &klines[start..=i];

            let allocation = self.strategy.assess(history_slice);
            let weight = allocation.weight(&self.symbol).unwrap_or(0.0);

            steps.push(AllocationStep {
                open_time: current_kline.open_time,
                close: current_kline.close.to_f64().unwrap_or(0.0),
                weight,
            });
        }

        let report = summarise(steps);
        tracing::info!(
            entries = report.entries,
            exits = report.exits,
            exposure = report.exposure,
            strategy_return = report.strategy_return,
            "Replay finished."
        );
        report
    }
}

fn summarise(steps: Vec<AllocationStep>) -> ReplayReport {
    if steps.is_empty() {
        return ReplayReport::default();
    }

    let mut entries = 0;
    let mut exits = 0;
    let mut previous_weight = 0.0;
    for step in &steps {
        if previous_weight == 0.0 && step.weight > 0.0 {
            entries += 1;
        } else if previous_weight > 0.0 && step.weight == 0.0 {
            exits += 1;
        }
        previous_weight = step.weight;
    }

    let invested = steps.iter().filter(|s| s.weight > 0.0).count();
    let exposure = invested as f64 / steps.len() as f64;

    // Weight held at bar i earns the close-to-close return into bar i + 1.
    let growth: f64 = steps
        .windows(2)
        .filter(|pair| pair[0].close > 0.0)
        .map(|pair| 1.0 + pair[0].weight * (pair[1].close / pair[0].close - 1.0))
        .product();

    let first_close = steps[0].close;
    let last_close = steps[steps.len() - 1].close;
    let buy_and_hold_return = if first_close > 0.0 {
        last_close / first_close - 1.0
    } else {
        0.0
    };

    ReplayReport {
        steps,
        entries,
        exits,
        exposure,
        strategy_return: growth - 1.0,
        buy_and_hold_return,
    }
}

/// Helper function to print the replay report in a readable format.
pub fn print_report(report: &ReplayReport) {
    println!("\n--- Replay Report ---");
    println!("-----------------------------------");
    println!("Steps:                 {}", report.steps.len());
    println!("Entries:               {}", report.entries);
    println!("Exits:                 {}", report.exits);
    println!("Exposure:              {:.2}%", report.exposure * 100.0);
    println!("Strategy Return:       {:.2}%", report.strategy_return * 100.0);
    println!("Buy & Hold Return:     {:.2}%", report.buy_and_hold_return * 100.0);
    println!("-----------------------------------");

    let signals: Vec<_> = report.steps.iter().filter(|s| s.weight > 0.0).collect();
    if !signals.is_empty() {
        println!("Invested Bars:");
        for step in signals {
            match Utc.timestamp_millis_opt(step.open_time).single() {
                Some(time) => println!("  - {} @ {:.2}", time, step.close),
                None => println!("  - {} @ {:.2}", step.open_time, step.close),
            }
        }
        println!("-----------------------------------");
    }
}
