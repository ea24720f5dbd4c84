use crate::core::store::RecordStore;
use crate::domain::model::{larger, months_from_raw, Participant, Rank, RateCard, Student};
use crate::domain::ports::{ConfigProvider, RecordSink};
use crate::utils::error::{DojoError, Result};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

const MENU: &str = "\n1. Add Junior\n2. Add Senior\n3. View & Save\n4. Remove\n5. Exit\nSelection: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddJunior,
    AddSenior,
    ViewAndSave,
    Remove,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::AddJunior),
            "2" => Ok(MenuChoice::AddSenior),
            "3" => Ok(MenuChoice::ViewAndSave),
            "4" => Ok(MenuChoice::Remove),
            "5" => Ok(MenuChoice::Exit),
            other => Err(format!("'{other}' is not a menu option")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterSummary {
    pub count: usize,
    pub total_billed: f64,
    pub highest_rank: Option<Rank>,
}

impl RosterSummary {
    pub fn from_store(store: &RecordStore<Student>) -> Self {
        store.iter().fold(
            Self {
                count: 0,
                total_billed: 0.0,
                highest_rank: None,
            },
            |acc, student| Self {
                count: acc.count + 1,
                total_billed: acc.total_billed + student.total(),
                highest_rank: Some(match acc.highest_rank {
                    Some(rank) => larger(rank, student.rank()),
                    None => student.rank(),
                }),
            },
        )
    }
}

impl fmt::Display for RosterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Students: {} | Billed: ${:.2}", self.count, self.total_billed)?;
        if let Some(rank) = self.highest_rank {
            write!(f, " | Highest rank: {rank}")?;
        }
        Ok(())
    }
}

/// Interactive menu over a roster of students.
///
/// Reads answers from `input`, writes prompts and listings to `output`, and
/// hands rendered records to `sink` when the roster is saved. Out-of-range
/// indices and sink failures are reported and the loop keeps going.
pub struct Console<R, W, S> {
    input: R,
    output: W,
    sink: S,
    store: RecordStore<Student>,
    rates: RateCard,
}

impl<R: BufRead, W: Write, S: RecordSink> Console<R, W, S> {
    pub fn new(input: R, output: W, sink: S, rates: RateCard, initial_capacity: usize) -> Self {
        Self {
            input,
            output,
            sink,
            store: RecordStore::with_capacity(initial_capacity),
            rates,
        }
    }

    pub fn from_config<C: ConfigProvider>(input: R, output: W, sink: S, config: &C) -> Self {
        Self::new(input, output, sink, config.rates(), config.initial_capacity())
    }

    pub fn store(&self) -> &RecordStore<Student> {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn rates(&self) -> &RateCard {
        &self.rates
    }

    /// Runs until the user picks Exit or input runs out.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(line) = self.prompt(MENU)? else {
                break;
            };
            let step = match line.parse::<MenuChoice>() {
                Ok(choice) => self.dispatch(choice)?,
                Err(reason) => {
                    writeln!(self.output, "{reason}. Choose 1-5.")?;
                    Step::Continue
                }
            };
            if step == Step::Exit {
                break;
            }
        }
        tracing::info!(records = self.store.len(), "session ended");
        Ok(())
    }

    pub fn register(&mut self, student: Student) {
        tracing::info!(
            name = student.name(),
            kind = student.student_type(),
            "registered student"
        );
        self.store.append(student);
    }

    /// Accepts the raw index typed by the user, negatives included.
    pub fn remove(&mut self, index: i64) -> Result<Student> {
        let slot = usize::try_from(index).map_err(|_| DojoError::IndexOutOfBounds {
            index,
            len: self.store.len(),
        })?;
        let removed = self.store.remove_at(slot)?;
        tracing::info!(name = removed.name(), index, "removed student");
        Ok(removed)
    }

    /// Writes every record to the sink; returns how many were written.
    pub fn save_all(&mut self) -> Result<usize> {
        if self.store.is_empty() {
            return Ok(0);
        }
        self.sink.begin_session()?;
        for student in self.store.iter() {
            self.sink.write_record(&student.describe())?;
        }
        tracing::debug!(records = self.store.len(), "roster saved");
        Ok(self.store.len())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Step> {
        match choice {
            MenuChoice::AddJunior | MenuChoice::AddSenior => self.register_interactive(choice),
            MenuChoice::ViewAndSave => {
                self.view_and_save()?;
                Ok(Step::Continue)
            }
            MenuChoice::Remove => self.remove_interactive(),
            MenuChoice::Exit => Ok(Step::Exit),
        }
    }

    fn register_interactive(&mut self, choice: MenuChoice) -> Result<Step> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Step::Exit);
        };
        let Some(months) = self.prompt("Months: ")? else {
            return Ok(Step::Exit);
        };
        let Some(rank) = self.prompt("Rank (0-6): ")? else {
            return Ok(Step::Exit);
        };
        let Some(gear) = self.prompt("Gear (y/n): ")? else {
            return Ok(Step::Exit);
        };
        let extra_prompt = if choice == MenuChoice::AddJunior {
            "Guardian: "
        } else {
            "Emergency: "
        };
        let Some(extra) = self.prompt(extra_prompt)? else {
            return Ok(Step::Exit);
        };

        let name = name.trim();
        let months = months_from_raw(months.trim().parse().unwrap_or(0));
        let rank = Rank::from_code(rank.trim().parse().unwrap_or(0));
        let gear = gear.trim().starts_with(['y', 'Y']);
        let extra = extra.trim();

        let student = if choice == MenuChoice::AddJunior {
            Student::junior(name, months, rank, extra, gear, &self.rates)
        } else {
            Student::senior(name, months, rank, extra, gear, &self.rates)
        };
        writeln!(self.output, "Registered {} ({}).", student.name(), student.student_type())?;
        self.register(student);
        Ok(Step::Continue)
    }

    fn view_and_save(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.output, "No students registered.")?;
            return Ok(());
        }
        for (i, student) in self.store.iter().enumerate() {
            writeln!(self.output, "[{i}] {student}")?;
        }
        writeln!(self.output, "{}", RosterSummary::from_store(&self.store))?;

        match self.save_all() {
            Ok(count) => writeln!(self.output, "Saved {count} record(s).")?,
            Err(e) if e.is_recoverable() => self.report(&e)?,
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn remove_interactive(&mut self) -> Result<Step> {
        let Some(raw) = self.prompt("Index: ")? else {
            return Ok(Step::Exit);
        };
        let Ok(index) = raw.trim().parse::<i64>() else {
            writeln!(self.output, "Please enter a numeric index.")?;
            return Ok(Step::Continue);
        };
        match self.remove(index) {
            Ok(student) => writeln!(self.output, "Removed {}.", student.name())?,
            Err(e) if e.is_recoverable() => self.report(&e)?,
            Err(e) => return Err(e),
        }
        Ok(Step::Continue)
    }

    fn report(&mut self, error: &DojoError) -> Result<()> {
        tracing::warn!("{}", error);
        writeln!(self.output, "Error: {}", error.user_friendly_message())?;
        Ok(())
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
