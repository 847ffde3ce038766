use super::*;

/// Applies an admin's decision to a pending event.
pub fn moderate_event(
    connections: &sqlite::Connections,
    id: &str,
    decision: usecases::ModerationDecision,
    now: Timestamp,
) -> Result<()> {
    let mut connection = connections.exclusive()?;
    connection.transaction(|conn| usecases::moderate_event(conn, id, decision, now))?;
    Ok(())
}
