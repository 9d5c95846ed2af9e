//! Command-line logger
use super::{Event, LogError, Loggable, Logger};
use enum_map::{enum_map, EnumMap};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Drop;
use std::time::{Duration, Instant};
use yansi::Paint;

/// Logger that writes periodic summaries to stdout.
pub struct CLILogger {
    events: EnumMap<Event, EventLog>,

    display_period: Duration,
    last_display_time: Instant,

    average_between_displays: bool,
}

impl CLILogger {
    pub fn new(display_period: Duration, average_between_displays: bool) -> Self {
        Self {
            events: enum_map! { _ => EventLog::new() },
            display_period,
            last_display_time: Instant::now(),
            average_between_displays,
        }
    }

    /// Display the summary and clear all stored data.
    pub fn display(&mut self) {
        println!();
        for (event, event_log) in self.events.iter_mut() {
            let summary_size = event_log.index - event_log.summary_start_index;
            if summary_size == 0 {
                continue;
            }

            let header = if self.average_between_displays {
                format!(
                    "{:?}s {} - {}",
                    event,
                    event_log.summary_start_index,
                    event_log.index - 1
                )
            } else {
                format!("{:?} {}", event, event_log.index - 1)
            };
            let per_event = event_log.summary_duration / summary_size.try_into().unwrap_or(u32::MAX);
            println!(
                "==== {} ({:?} / event) ====",
                Paint::fixed(35, header),
                per_event
            );

            for (name, aggregator) in &mut event_log.aggregators {
                println!("{}: {}", name, aggregator);
                aggregator.clear()
            }
            event_log.summary_start_index = event_log.index;
        }
        self.last_display_time = Instant::now();
    }
}

impl fmt::Debug for CLILogger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CLILogger")
            .field("display_period", &self.display_period)
            .field("average_between_displays", &self.average_between_displays)
            .finish()
    }
}

impl Logger for CLILogger {
    fn log(&mut self, event: Event, name: &str, value: Loggable) -> Result<(), LogError> {
        let aggregators = &mut self.events[event].aggregators;
        let result = if let Some(aggregator) = aggregators.get_mut(name) {
            aggregator.update(value)
        } else {
            Aggregator::new(value).map(|aggregator| {
                aggregators.insert(name.into(), aggregator);
            })
        };
        result.map_err(|(value, expected)| LogError::new(name, value, expected))
    }

    fn done(&mut self, event: Event) {
        let event_info = &mut self.events[event];
        event_info.index += 1;

        for aggregator in event_info.aggregators.values_mut() {
            aggregator.commit()
        }

        let time_since_display = self.last_display_time.elapsed();
        event_info.summary_duration = time_since_display;
        if time_since_display < self.display_period {
            return;
        }

        self.display();
    }
}

impl Drop for CLILogger {
    fn drop(&mut self) {
        // Ensure everything is flushed.
        self.display();
    }
}

struct EventLog {
    /// Global index for this event
    index: u64,
    /// Value of `index` at the start of this summary period
    summary_start_index: u64,
    /// Duration of this summary period to the most recent update
    summary_duration: Duration,
    /// An aggregator for each log entry.
    aggregators: BTreeMap<String, Aggregator>,
}

impl EventLog {
    #[allow(clippy::missing_const_for_fn)] // BTreeMap const new not stabilized
    fn new() -> Self {
        Self {
            index: 0,
            summary_start_index: 0,
            summary_duration: Duration::new(0, 0),
            aggregators: BTreeMap::new(),
        }
    }
}

/// Aggregates the values logged under one name.
///
/// Values logged during an event are pending until the event is done.
/// A later value in the same event replaces an earlier one.
#[derive(Debug, Clone, PartialEq)]
enum Aggregator {
    /// Aggregates nothing
    Nothing,
    ScalarMean {
        sum: f64,
        count: u64,
        pending: Option<f64>,
    },
    IndexDistribution {
        counts: Vec<u64>,
        pending: Option<usize>,
    },
    MessageCounts {
        counts: BTreeMap<Cow<'static, str>, u64>,
        pending: Option<Cow<'static, str>>,
    },
}
use Aggregator::*;

impl Aggregator {
    /// Create a new aggregator from a logged value.
    ///
    /// Returns `Err((value, expected))` if the value is out of range.
    fn new(value: Loggable) -> Result<Self, (Loggable, String)> {
        if let Loggable::IndexSample { value: index, size } = value {
            if index >= size {
                return Err((value, format!("IndexSample{{value < {}}}", size)));
            }
        }
        Ok(match value {
            Loggable::Nothing => Nothing,
            Loggable::Scalar(x) => ScalarMean {
                sum: 0.0,
                count: 0,
                pending: Some(x),
            },
            Loggable::IndexSample { value, size } => IndexDistribution {
                counts: vec![0; size],
                pending: Some(value),
            },
            Loggable::Message(message) => MessageCounts {
                counts: BTreeMap::new(),
                pending: Some(message),
            },
        })
    }

    /// Update an aggregator with a logged value within an event.
    ///
    /// Returns `Err((value, expected))` if the value is incompatible with this aggregator.
    fn update(&mut self, value: Loggable) -> Result<(), (Loggable, String)> {
        match (self, value) {
            (Nothing, Loggable::Nothing) => {}
            (ScalarMean { pending, .. }, Loggable::Scalar(x)) => *pending = Some(x),
            (IndexDistribution { counts, pending }, Loggable::IndexSample { value, size })
                if counts.len() == size && value < size =>
            {
                *pending = Some(value)
            }
            (MessageCounts { pending, .. }, Loggable::Message(message)) => {
                *pending = Some(message)
            }
            (aggregator, value) => return Err((value, aggregator.expected())),
        }
        Ok(())
    }

    /// Description of the values this aggregator accepts.
    fn expected(&self) -> String {
        match self {
            Nothing => "Nothing".into(),
            ScalarMean { .. } => "Scalar".into(),
            IndexDistribution { counts, .. } => {
                format!("IndexSample{{size: {0}, value < {0}}}", counts.len())
            }
            MessageCounts { .. } => "Message".into(),
        }
    }

    /// Commit the pending value into the aggregate.
    fn commit(&mut self) {
        match self {
            Nothing => {}
            ScalarMean {
                sum,
                count,
                pending,
            } => {
                if let Some(x) = pending.take() {
                    *sum += x;
                    *count += 1;
                }
            }
            IndexDistribution { counts, pending } => {
                if let Some(i) = pending.take() {
                    counts[i] += 1;
                }
            }
            MessageCounts { counts, pending } => {
                if let Some(message) = pending.take() {
                    *counts.entry(message).or_insert(0) += 1;
                }
            }
        }
    }

    /// Clear the aggregated values (but not the pending values)
    fn clear(&mut self) {
        match self {
            Nothing => {}
            ScalarMean { sum, count, .. } => {
                *sum = 0.0;
                *count = 0;
            }
            IndexDistribution { counts, .. } => counts.iter_mut().for_each(|c| *c = 0),
            MessageCounts { counts, .. } => counts.clear(),
        }
    }
}

/// Display the committed aggregated value.
impl fmt::Display for Aggregator {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Nothing => write!(f, "Nothing"),
            ScalarMean { sum, count, .. } => write!(f, "{}", sum / (*count as f64)),
            IndexDistribution { counts, .. } => {
                let total: u64 = counts.iter().sum();
                if total == 0 {
                    return write!(f, "None");
                }
                write!(f, "[")?;
                for (i, c) in counts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:.3}", (*c as f64) / (total as f64))?;
                }
                write!(f, "]")
            }
            MessageCounts { counts, .. } => {
                if counts.len() == 1 {
                    for (message, count) in counts {
                        write!(f, "[x{}] {}", count, message)?;
                    }
                } else {
                    for (message, count) in counts {
                        write!(f, "\n\t[x{}] {}", count, message)?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod cli_logger {
    use super::*;

    #[test]
    fn scalar_mean() {
        let mut agg = Aggregator::new(Loggable::Scalar(1.0)).unwrap();
        agg.commit();
        agg.update(Loggable::Scalar(3.0)).unwrap();
        agg.commit();
        assert_eq!(agg.to_string(), "2");
    }

    #[test]
    fn pending_value_replaced_within_event() {
        let mut agg = Aggregator::new(Loggable::Scalar(1.0)).unwrap();
        agg.update(Loggable::Scalar(5.0)).unwrap();
        agg.commit();
        assert_eq!(agg.to_string(), "5");
    }

    #[test]
    fn index_distribution() {
        let mut agg = Aggregator::new(Loggable::IndexSample { value: 0, size: 2 }).unwrap();
        agg.commit();
        for value in [1, 1, 1] {
            agg.update(Loggable::IndexSample { value, size: 2 }).unwrap();
            agg.commit();
        }
        assert_eq!(agg.to_string(), "[0.250, 0.750]");
        agg.clear();
        assert_eq!(agg.to_string(), "None");
    }

    #[test]
    fn message_counts() {
        let mut agg = Aggregator::new(Loggable::from("stay")).unwrap();
        agg.commit();
        agg.update(Loggable::from("stay")).unwrap();
        agg.commit();
        assert_eq!(agg.to_string(), "[x2] stay");
    }

    #[test]
    fn incompatible_value() {
        let mut logger = CLILogger::new(Duration::from_secs(3600), true);
        logger.log(Event::Step, "reward", 1.0.into()).unwrap();
        let err = logger
            .log(Event::Step, "reward", Loggable::IndexSample { value: 0, size: 3 })
            .unwrap_err();
        assert_eq!(
            err,
            LogError::new(
                "reward",
                Loggable::IndexSample { value: 0, size: 3 },
                "Scalar".into()
            )
        );
    }

    #[test]
    fn out_of_range_index_rejected() {
        let mut logger = CLILogger::new(Duration::from_secs(3600), true);
        let err = logger
            .log(Event::Step, "node", Loggable::IndexSample { value: 5, size: 3 })
            .unwrap_err();
        assert_eq!(
            err,
            LogError::new(
                "node",
                Loggable::IndexSample { value: 5, size: 3 },
                "IndexSample{value < 3}".into()
            )
        );
        logger.done(Event::Step);

        logger
            .log(Event::Step, "node", Loggable::IndexSample { value: 2, size: 3 })
            .unwrap();
        assert!(logger
            .log(Event::Step, "node", Loggable::IndexSample { value: 3, size: 3 })
            .is_err());
        logger.done(Event::Step);
        logger.display();
    }

    #[test]
    fn index_size_mismatch() {
        let mut agg = Aggregator::new(Loggable::IndexSample { value: 0, size: 2 }).unwrap();
        assert!(agg
            .update(Loggable::IndexSample { value: 0, size: 3 })
            .is_err());
    }
}
