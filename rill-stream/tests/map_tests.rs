// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_stream::{map2, map_all, ResultExt, Source, StreamError};
use rill_test_utils::test_data::{person_alice, person_bob};
use rill_test_utils::{
    assert_no_element_emitted, assert_stream_ended, collect_n, next_within, Person, TestData,
};

#[tokio::test]
async fn test_map_applies_function_to_each_message() -> anyhow::Result<()> {
    // Arrange
    let source = Source::new();
    let squared = source.map(|n: i32| n * n)?;
    let mut observer = squared.listen()?;

    // Act
    source.push_all([1, 2, 3])?;

    // Assert
    assert_eq!(collect_n(&mut observer, 3).await, vec![1, 4, 9]);
    assert_eq!(squared.read(), Some(9));
    Ok(())
}

#[tokio::test]
async fn test_map_initial_head_is_mapped_parent_head() -> anyhow::Result<()> {
    let seeded = Source::with_initial(4);
    let empty = Source::<i32>::new();

    let from_seeded = seeded.map(|n| n + 1)?;
    let from_empty = empty.map(|n| n + 1)?;

    assert_eq!(from_seeded.read(), Some(5));
    assert_eq!(from_empty.read(), None);
    Ok(())
}

#[tokio::test]
async fn test_map_changes_type() -> anyhow::Result<()> {
    // Arrange
    let people = Source::with_initial(person_alice());
    let names = people.map(|data| match data {
        TestData::Person(Person { name, .. }) => name,
        other => other.to_string(),
    })?;
    let mut observer = names.listen()?;
    assert_eq!(names.read().as_deref(), Some("Alice"));

    // Act
    people.push(person_bob())?;

    // Assert
    assert_eq!(next_within(&mut observer, 1_000).await, "Bob");
    assert_eq!(names.read().as_deref(), Some("Bob"));
    Ok(())
}

#[tokio::test]
async fn test_try_map_error_terminates_only_that_stream() -> anyhow::Result<()> {
    // Arrange
    let source = Source::new();
    let parsed = source.try_map(|text: &'static str| text.parse::<i32>().context("parsing"))?;
    let lengths = source.map(str::len)?;
    let mut parsed_observer = parsed.listen()?;
    let mut lengths_observer = lengths.listen()?;

    // Act
    source.push_all(["1", "x", "3"])?;

    // Assert
    assert_eq!(next_within(&mut parsed_observer, 1_000).await, 1);
    assert_stream_ended(&mut parsed_observer, 1_000).await;
    assert_eq!(collect_n(&mut lengths_observer, 3).await, vec![1, 1, 1]);
    Ok(())
}

#[tokio::test]
async fn test_try_map_error_on_initial_head_is_returned() {
    let source = Source::with_initial("not a number");

    let result = source.try_map(|text| text.parse::<i32>().context("parsing"));

    assert!(matches!(result, Err(StreamError::HandlerFault { .. })));
}

#[tokio::test]
async fn test_constantly() -> anyhow::Result<()> {
    // Arrange
    let source = Source::<i32>::new();
    let ticks = source.constantly("tick")?;
    let mut observer = ticks.listen()?;
    assert_eq!(ticks.read(), Some("tick"));

    // Act
    source.push_all([1, 2])?;

    // Assert
    assert_eq!(collect_n(&mut observer, 2).await, vec!["tick", "tick"]);
    Ok(())
}

#[tokio::test]
async fn test_map2_combines_latest_values() -> anyhow::Result<()> {
    // Arrange
    let width = Source::with_initial(2_u32);
    let label = Source::<&'static str>::new();
    let described = map2(&width, &label, |w, l| format!("{l}:{w}"))?;
    let mut observer = described.listen()?;
    assert_eq!(described.read(), None);

    // Act
    width.push(3)?;
    assert_no_element_emitted(&mut observer, 50).await;
    label.push("box")?;
    let first = next_within(&mut observer, 1_000).await;
    width.push(4)?;
    let second = next_within(&mut observer, 1_000).await;

    // Assert
    assert_eq!(first, "box:3");
    assert_eq!(second, "box:4");
    Ok(())
}

#[tokio::test]
async fn test_map2_initial_head_from_both_heads() -> anyhow::Result<()> {
    let a = Source::with_initial(2);
    let b = Source::with_initial(5);

    let product = map2(&a, &b, |x, y| x * y)?;

    assert_eq!(product.read(), Some(10));
    Ok(())
}

#[tokio::test]
async fn test_map_all_spreads_latest_values() -> anyhow::Result<()> {
    // Arrange
    let a = Source::with_initial(1);
    let b = Source::with_initial(2);
    let c = Source::with_initial(3);
    let sum = map_all(&[&a, &b, &c], |values| values.iter().sum::<i32>())?;
    let mut observer = sum.listen()?;
    assert_eq!(sum.read(), Some(6));

    // Act
    b.push(20)?;
    let first = next_within(&mut observer, 1_000).await;
    c.push(30)?;
    let second = next_within(&mut observer, 1_000).await;

    // Assert
    assert_eq!(first, 24);
    assert_eq!(second, 51);
    Ok(())
}
