//! Order Fulfillment Example
//!
//! Walks an order through its logistics steps, streaming lifecycle events to
//! a consumer task over a channel.
//!
//! Run:
//!   cargo run --example order_fulfillment -p stepgraph
//!
//! Set STEPGRAPH_POST_VALIDATION=rollback to see a rejected delivery failure
//! revert the order to Shipped.

use serde::Serialize;
use stepgraph::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
enum OverallStatus {
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
enum Logistics {
    ReadyToHandle,
    Handling,
    ReadyToShip,
    Shipped,
    Received,
    NotDelivered,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OrderEvent {
    Shipping { order_id: u32, code: String },
    Shipped { order_id: u32, code: String },
}

#[derive(Debug, Serialize)]
struct Order {
    id: u32,
    code: String,
    overall: OverallStatus,
    approved: bool,
    logistics: StepRecord<Logistics>,
    history: Vec<StepRecord<Logistics>>,
}

fn logistics(o: &Order) -> &StepRecord<Logistics> {
    &o.logistics
}

fn logistics_mut(o: &mut Order) -> &mut StepRecord<Logistics> {
    &mut o.logistics
}

fn history(o: &mut Order) -> &mut Vec<StepRecord<Logistics>> {
    &mut o.history
}

fn order_graph() -> Result<WorkflowGraph<Order, Logistics, OrderEvent>, GraphIntegrityError> {
    use Logistics::*;

    GraphBuilder::<Order, Logistics, OrderEvent>::new()
        .for_step(ReadyToHandle, |step| {
            step.add_next_steps([Handling])
                .add_entry_validation(|o| o.overall == OverallStatus::Active, "Order not active")
                .add_entry_validation(|o| !o.approved, "Order already approved")
                .add_exit_validation(|o| o.approved, "Order not approved");
        })
        .for_step(Handling, |step| {
            step.add_next_steps([ReadyToShip])
                .add_entry_validation(|o| o.overall == OverallStatus::Active, "Order not active");
        })
        .for_step(ReadyToShip, |step| {
            step.add_next_steps([Shipped]);
        })
        .for_step(Shipped, |step| {
            step.add_next_steps([Received, NotDelivered])
                .add_event_before_entering(|o: &Order| OrderEvent::Shipping {
                    order_id: o.id,
                    code: o.code.clone(),
                });
        })
        .for_step(Received, |step| {
            step.add_next_steps([Received])
                .add_event_after_entering(|o: &Order| OrderEvent::Shipped {
                    order_id: o.id,
                    code: o.code.clone(),
                });
        })
        .for_step(NotDelivered, |step| {
            step.add_post_entry_validation(|o| o.logistics.has_reason(), "You must enter a reason");
        })
        .build()
}

fn new_order(id: u32, code: &str) -> Order {
    Order {
        id,
        code: code.to_string(),
        overall: OverallStatus::Active,
        approved: true,
        logistics: StepRecord::new(Logistics::ReadyToHandle),
        history: Vec::new(),
    }
}

async fn run<K>(
    engine: &StepEngine<Order, Logistics, OrderEvent, K>,
    accessor: &FieldAccessor<Order, Logistics>,
    order: &mut Order,
    script: &[(Logistics, Option<&str>)],
) where
    K: EventSink<OrderEvent>,
{
    println!("--- {} ---", order.code);
    for (step, reason) in script {
        match engine.change_step(order, accessor, *step, *reason).await {
            Ok(outcome) => println!("{step:?}: now {:?}", outcome.current()),
            Err(e) => println!("{step:?}: rejected: {e}"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info,stepgraph=debug")
        .init();

    println!("=== Order Fulfillment Example ===");
    println!();

    let graph = order_graph()?;

    let (sink, mut receiver) = ChannelEventSink::channel(16);
    let consumer = tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => println!("  [event] {json}"),
                Err(e) => eprintln!("  [event] unserializable: {e}"),
            }
        }
    });

    let engine = StepEngine::new(graph, sink).with_config(EngineConfig::from_env());
    println!("Post-validation policy: {}", engine.config().post_validation);
    for flow in engine.graph().get_flow() {
        println!("  {:?} -> {:?}", flow.from, flow.to);
    }
    println!();
    let accessor = FieldAccessor::new(logistics, logistics_mut).with_history(history);

    let mut delivered = new_order(1, "ORD-0001");
    run(
        &engine,
        &accessor,
        &mut delivered,
        &[
            (Logistics::Handling, None),
            (Logistics::ReadyToShip, Some("Packed")),
            (Logistics::Shipped, Some("Courier picked up")),
            (Logistics::Received, None),
            // A received order cannot turn into a failed delivery
            (Logistics::NotDelivered, Some("Lost")),
        ],
    )
    .await;
    delivered.overall = OverallStatus::Finished;

    let mut undelivered = new_order(2, "ORD-0002");
    run(
        &engine,
        &accessor,
        &mut undelivered,
        &[
            (Logistics::Handling, None),
            (Logistics::ReadyToShip, None),
            (Logistics::Shipped, None),
            (Logistics::NotDelivered, None),
        ],
    )
    .await;

    println!();
    println!("Final orders:");
    println!("{}", serde_json::to_string_pretty(&[&delivered, &undelivered])?);

    drop(engine);
    consumer.await?;

    Ok(())
}
