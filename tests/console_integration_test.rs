use dojo_roster::domain::ports::RecordSink;
use dojo_roster::{Console, DojoError, Participant, Rank, RateCard, Result, Student};
use std::io::Cursor;

#[derive(Debug, Default)]
struct MemorySink {
    sessions: usize,
    records: Vec<String>,
}

impl RecordSink for MemorySink {
    fn begin_session(&mut self) -> Result<()> {
        self.sessions += 1;
        Ok(())
    }

    fn write_record(&mut self, rendered: &str) -> Result<()> {
        self.records.push(rendered.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct FailingSink;

impl RecordSink for FailingSink {
    fn write_record(&mut self, _rendered: &str) -> Result<()> {
        Err(DojoError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

const REGISTER_TIM: &str = "1\nTim\n1\n0\nn\nJane\n";
const REGISTER_ANN: &str = "2\nAnn\n10\n6\ny\nContact\n";

fn console_with<S: RecordSink>(script: &str, sink: S) -> Console<Cursor<Vec<u8>>, Vec<u8>, S> {
    Console::new(
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
        sink,
        RateCard::default(),
        2,
    )
}

fn output_of<S: RecordSink>(console: &Console<Cursor<Vec<u8>>, Vec<u8>, S>) -> String {
    String::from_utf8(console.output().clone()).unwrap()
}

#[test]
fn test_register_two_then_remove_first() {
    let script = format!("{REGISTER_TIM}{REGISTER_ANN}4\n0\n5\n");
    let mut console = console_with(&script, MemorySink::default());

    console.run().unwrap();

    let store = console.store();
    assert_eq!(store.len(), 1);
    let remaining = store.at(0).unwrap();
    assert!(matches!(remaining, Student::Senior(_)));
    assert_eq!(remaining.name(), "Ann");
    assert_eq!(remaining.rank(), Rank::Black);
    assert_eq!(format!("{:.2}", remaining.total()), "259.70");

    let output = output_of(&console);
    assert!(output.contains("Registered Tim (Junior)."));
    assert!(output.contains("Registered Ann (Senior)."));
    assert!(output.contains("Removed Tim."));
}

#[test]
fn test_store_size_after_registration() {
    let script = format!("{REGISTER_TIM}{REGISTER_ANN}5\n");
    let mut console = console_with(&script, MemorySink::default());

    console.run().unwrap();

    assert_eq!(console.store().len(), 2);
    assert!(matches!(console.store().at(0).unwrap(), Student::Junior(_)));
    assert_eq!(format!("{:.2}", console.store().at(0).unwrap().total()), "84.80");
}

#[test]
fn test_view_prints_and_saves_every_record() {
    let script = format!("{REGISTER_TIM}{REGISTER_ANN}3\n5\n");
    let mut console = console_with(&script, MemorySink::default());

    console.run().unwrap();

    let output = output_of(&console);
    assert!(output.contains("[0] Name: Tim\nType: Junior\n"));
    assert!(output.contains("[1] Name: Ann\nType: Senior\n"));
    assert!(output.contains("Students: 2 | Billed: $344.50 | Highest rank: Black"));
    assert!(output.contains("Saved 2 record(s)."));

    let sink = console.sink();
    assert_eq!(sink.sessions, 1);
    assert_eq!(sink.records.len(), 2);
    assert_eq!(sink.records[0], console.store().at(0).unwrap().describe());
    assert!(sink.records[1].contains("Emergency Contact: Contact"));
}

#[test]
fn test_view_on_empty_roster_saves_nothing() {
    let mut console = console_with("3\n5\n", MemorySink::default());

    console.run().unwrap();

    assert!(output_of(&console).contains("No students registered."));
    assert_eq!(console.sink().sessions, 0);
    assert!(console.sink().records.is_empty());
}

#[test]
fn test_bad_indices_are_reported_and_loop_continues() {
    let script = format!("4\n7\n4\n-1\n4\nabc\n{REGISTER_TIM}4\n1\n5\n");
    let mut console = console_with(&script, MemorySink::default());

    console.run().unwrap();

    let output = output_of(&console);
    assert!(output.contains("Error: There is no record #7: the roster is empty."));
    assert!(output.contains("Error: There is no record #-1: the roster is empty."));
    assert!(output.contains("Please enter a numeric index."));
    assert!(output.contains("Error: There is no record #1. Valid indices are 0 to 0."));
    assert_eq!(console.store().len(), 1);
}

#[test]
fn test_remove_rejects_out_of_range_directly() {
    let mut console = console_with("", MemorySink::default());
    let rates = RateCard::default();
    console.register(Student::junior("Tim", 1, Rank::White, "Jane", false, &rates));

    assert!(matches!(
        console.remove(-1),
        Err(DojoError::IndexOutOfBounds { index: -1, len: 1 })
    ));
    assert!(matches!(
        console.remove(1),
        Err(DojoError::IndexOutOfBounds { index: 1, len: 1 })
    ));
    assert_eq!(console.remove(0).unwrap().name(), "Tim");
    assert!(console.store().is_empty());
}

#[test]
fn test_lenient_input_is_clamped() {
    let script = "1\nKid\n-3\n9\nN\nMom\n2\nAdult\nabc\nxyz\nY\nFriend\n5\n";
    let mut console = console_with(script, MemorySink::default());

    console.run().unwrap();

    let kid = console.store().at(0).unwrap();
    assert_eq!(kid.months_enrolled(), 0);
    assert_eq!(kid.rank(), Rank::White);
    assert_eq!(format!("{:.2}", kid.total()), "84.80");

    let adult = console.store().at(1).unwrap();
    assert_eq!(adult.months_enrolled(), 0);
    assert_eq!(adult.rank(), Rank::White);
    assert_eq!(format!("{:.2}", adult.total()), "259.70");
}

#[test]
fn test_unknown_choice_redisplays_menu() {
    let mut console = console_with("9\n5\n", MemorySink::default());

    console.run().unwrap();

    let output = output_of(&console);
    assert!(output.contains("'9' is not a menu option. Choose 1-5."));
    assert_eq!(output.matches("Selection: ").count(), 2);
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let mut console = console_with("1\nHalf\n", MemorySink::default());

    console.run().unwrap();

    assert!(console.store().is_empty());
}

#[test]
fn test_sink_failure_does_not_end_session() {
    let script = format!("{REGISTER_TIM}3\n{REGISTER_ANN}5\n");
    let mut console = console_with(&script, FailingSink);

    console.run().unwrap();

    let output = output_of(&console);
    assert!(output.contains("Error: Could not access the records file"));
    assert_eq!(console.store().len(), 2);
}

#[test]
fn test_growth_past_initial_capacity_keeps_order() {
    let mut console = Console::new(
        Cursor::new(Vec::new()),
        Vec::new(),
        MemorySink::default(),
        RateCard::default(),
        1,
    );
    let rates = RateCard::default();
    let names = ["A", "B", "C", "D", "E"];
    for name in names {
        console.register(Student::senior(name, 2, Rank::Blue, "X", false, &rates));
    }

    assert!(console.store().capacity() >= 2);
    let stored: Vec<&str> = console.store().iter().map(|s| s.name()).collect();
    assert_eq!(stored, names);
}
