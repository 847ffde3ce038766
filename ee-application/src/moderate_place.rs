use super::*;

/// Applies an admin's decision to a pending place.
pub fn moderate_place(
    connections: &sqlite::Connections,
    id: &str,
    decision: usecases::ModerationDecision,
    now: Timestamp,
) -> Result<()> {
    let mut connection = connections.exclusive()?;
    connection.transaction(|conn| usecases::moderate_place(conn, id, decision, now))?;
    Ok(())
}
