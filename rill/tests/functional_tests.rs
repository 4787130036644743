// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill::prelude::*;
use rill_test_utils::{assert_stream_ended, collect_n, next_within, wait_terminated};
use serde_json::{json, Value};

#[tokio::test]
async fn test_functional_order_book() -> anyhow::Result<()> {
    // Arrange
    let orders: Source<Value> = Source::new();
    let buys = orders.filter_by(json!({ "side": "buy" }))?;
    let volume = buys
        .try_map(|order| {
            order["qty"]
                .as_u64()
                .ok_or_else(|| StreamError::handler_fault("order without qty"))
        })?
        .reduce(0, |acc, qty| acc + qty)?;
    let mut observer = volume.listen()?;

    // Act
    orders.push_all([
        json!({ "side": "buy", "qty": 5 }),
        json!({ "side": "sell", "qty": 3 }),
        json!({ "side": "buy", "qty": 7 }),
    ])?;

    // Assert
    assert_eq!(collect_n(&mut observer, 2).await, vec![5, 12]);
    assert_eq!(volume.read(), Some(12));
    Ok(())
}

#[tokio::test]
async fn test_functional_fault_stops_only_faulty_branch() -> anyhow::Result<()> {
    // Arrange
    let orders: Source<Value> = Source::new();
    let quantities = orders.try_map(|order| {
        order["qty"]
            .as_u64()
            .ok_or_else(|| StreamError::handler_fault("order without qty"))
    })?;
    let sides = orders.map(|order| order["side"].as_str().unwrap_or("?").to_string())?;
    let mut quantities_observer = quantities.listen()?;
    let mut sides_observer = sides.listen()?;

    // Act
    orders.push_all([
        json!({ "side": "buy", "qty": 1 }),
        json!({ "side": "sell" }),
        json!({ "side": "buy", "qty": 2 }),
    ])?;

    // Assert
    assert_eq!(next_within(&mut quantities_observer, 1_000).await, 1);
    assert_stream_ended(&mut quantities_observer, 1_000).await;
    assert_eq!(
        collect_n(&mut sides_observer, 3).await,
        vec!["buy", "sell", "buy"]
    );
    Ok(())
}

#[tokio::test]
async fn test_functional_bounded_pipeline_delivers_everything() -> anyhow::Result<()> {
    // Arrange
    let config = StreamConfig::bounded(std::num::NonZeroUsize::new(1).unwrap());
    let source = Source::with_config(config);
    let doubled = source.map(|n: u32| n * 2)?;
    let mut observer = doubled.listen()?;
    let producer = {
        let source = source.clone();
        tokio::spawn(async move {
            for n in 0..20 {
                source.send(n).await?;
            }
            Ok::<_, StreamError>(())
        })
    };

    // Act
    let received = collect_n(&mut observer, 20).await;

    // Assert
    producer.await??;
    assert_eq!(received, (0..20).map(|n| n * 2).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn test_functional_shutdown_by_dropping_handles() -> anyhow::Result<()> {
    // Arrange
    let source = Source::<i32>::new();
    let source_probe = source.termination();
    let pipeline = source.map(|n| n + 1)?.uniq()?;
    let pipeline_probe = pipeline.termination();

    // Act
    drop(source);
    drop(pipeline);

    // Assert
    wait_terminated(&pipeline_probe, 1_000).await;
    wait_terminated(&source_probe, 1_000).await;
    Ok(())
}
