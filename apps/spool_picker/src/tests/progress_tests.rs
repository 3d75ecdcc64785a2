use shared::domain::PrinterId;
use tokio::sync::broadcast;

use super::*;

fn selection(id: &str) -> AssignmentEvent {
    AssignmentEvent::SelectionChanged {
        printer_id: PrinterId::new(id),
    }
}

fn confirming() -> AssignmentEvent {
    AssignmentEvent::StateChanged {
        step: Step::Confirming,
        error: None,
    }
}

#[tokio::test]
async fn skips_unrelated_events() {
    let (tx, mut rx) = broadcast::channel(8);
    tx.send(selection("printer-1")).expect("send");
    tx.send(AssignmentEvent::StateChanged {
        step: Step::SelectPrinter,
        error: None,
    })
    .expect("send");
    tx.send(confirming()).expect("send");

    assert!(next_confirming(&mut rx).await);
}

#[tokio::test]
async fn keeps_watching_after_lagging_behind() {
    let (tx, mut rx) = broadcast::channel(2);
    for n in 0..5 {
        tx.send(selection(&format!("printer-{n}"))).expect("send");
    }
    tx.send(confirming()).expect("send");

    assert!(next_confirming(&mut rx).await);
}

#[tokio::test]
async fn stops_when_the_controller_is_gone() {
    let (tx, mut rx) = broadcast::channel::<AssignmentEvent>(2);
    tx.send(selection("printer-1")).expect("send");
    drop(tx);

    assert!(!next_confirming(&mut rx).await);
}
