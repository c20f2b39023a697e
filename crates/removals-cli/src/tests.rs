use super::*;
use crate::booking::DraftSteps;
use removals_core::draft::parse_draft;
use removals_core::{BookingStore, TimeValue, VanType};

#[test]
fn parses_price_command() {
    let cli = Cli::try_parse_from(["removals-cli", "price", "move.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Price { ref draft } if draft == &PathBuf::from("move.yaml")
    ));
}

#[test]
fn parses_reconcile_with_draft() {
    let cli = Cli::try_parse_from([
        "removals-cli",
        "reconcile",
        "https://shop.example/success?session_id=cs_1",
        "--draft",
        "move.yaml",
    ])
    .expect("expected valid cli args");
    let Commands::Reconcile { return_url, draft } = cli.command else {
        panic!("expected reconcile command");
    };
    assert_eq!(return_url, "https://shop.example/success?session_id=cs_1");
    assert_eq!(draft, Some(PathBuf::from("move.yaml")));
}

#[test]
fn parses_quote_status() {
    let cli = Cli::try_parse_from(["removals-cli", "quote-status", "Q-1"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::QuoteStatus { ref quote_ref } if quote_ref == "Q-1"
    ));
}

#[test]
fn draft_file_is_required() {
    assert!(Cli::try_parse_from(["removals-cli", "book"]).is_err());
    assert!(Cli::try_parse_from(["removals-cli"]).is_err());
}

const DRAFT: &str = r"
pickup:
  address: 12 Mill Lane
  postcode: LS1 4AP
delivery:
  address: 1 Piccadilly, Manchester
items:
  - name: Sofa
    quantity: 1
selectedDate:
  date: 2030-06-01
  pickupTime: 8.5
  numberOfMovers: 2
van:
  type: medium
";

#[test]
fn draft_splits_into_steps() {
    let steps = DraftSteps::from(parse_draft(DRAFT).expect("valid draft"));
    assert_eq!(steps.location.pickup.address, "12 Mill Lane");
    assert_eq!(steps.items.items.len(), 1);
    assert_eq!(steps.schedule.pickup_time, TimeValue::Hours(8.5));
    assert_eq!(steps.schedule.number_of_movers, 2);
    assert_eq!(steps.schedule.van_type, Some(VanType::Medium));
}

#[test]
fn missing_pickup_time_fails_validation_instead_of_defaulting() {
    let steps = DraftSteps::from(parse_draft("selectedDate: {}").expect("valid draft"));
    assert_eq!(
        steps.schedule.pickup_time,
        TimeValue::Formatted(String::new())
    );
}

#[test]
fn seeding_writes_formatted_addresses() {
    let mut store = BookingStore::new();
    DraftSteps::from(parse_draft(DRAFT).expect("valid draft")).seed(&mut store);
    assert_eq!(store.pickup().address, "12 Mill Lane LS1 4AP, UK");
    assert_eq!(store.selected_date().number_of_movers, Some(2));
    assert_eq!(store.items()[0].name, "Sofa");
}
