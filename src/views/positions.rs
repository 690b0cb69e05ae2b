//! Positions list with a create/edit form
//!
//! The form is in "create" mode until [`PositionsBoard::begin_edit`] picks
//! a record; `editing_id` is the only mode flag. Every successful mutation
//! is followed by a full refetch, so `positions` is never patched locally.

use crate::api::{Position, PositionInput, PositionsApi};

/// What a submit will do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(i64),
}

pub struct PositionsBoard<A: PositionsApi> {
    api: A,
    pub positions: Vec<Position>,
    pub form: PositionInput,
    pub editing_id: Option<i64>,
    pub error: Option<String>,
}

impl<A: PositionsApi> PositionsBoard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            positions: Vec::new(),
            form: PositionInput::default(),
            editing_id: None,
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn mode(&self) -> FormMode {
        match self.editing_id {
            Some(id) => FormMode::Update(id),
            None => FormMode::Create,
        }
    }

    /// Replace the list with what the backend has now
    pub async fn refresh(&mut self) -> bool {
        match self.api.list_positions().await {
            Ok(positions) => {
                tracing::debug!("loaded {} positions", positions.len());
                self.positions = positions;
                self.error = None;
                true
            }
            Err(e) => {
                tracing::warn!("failed to load positions: {}", e);
                self.error = Some(e.user_message());
                false
            }
        }
    }

    /// Load a listed record into the form and switch to update mode
    pub fn begin_edit(&mut self, id: i64) -> bool {
        match self.positions.iter().find(|p| p.position_id == Some(id)) {
            Some(position) => {
                self.form = PositionInput::from(position);
                self.editing_id = Some(id);
                self.error = None;
                true
            }
            None => {
                self.error = Some(format!("Position {} not found", id));
                false
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form = PositionInput::default();
        self.editing_id = None;
    }

    /// Create or update depending on [`mode`](Self::mode). Fields are sent
    /// as-is, even when empty.
    pub async fn submit(&mut self) -> bool {
        self.error = None;

        let result = match self.mode() {
            FormMode::Create => self.api.create_position(&self.form).await,
            FormMode::Update(id) => self.api.update_position(id, &self.form).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(mode = ?self.mode(), code = %self.form.position_code, "position saved");
                self.cancel_edit();
                self.refresh().await
            }
            Err(e) => {
                tracing::warn!("failed to save position: {}", e);
                self.error = Some(e.user_message());
                false
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> bool {
        self.error = None;

        match self.api.delete_position(id).await {
            Ok(()) => {
                tracing::info!(id, "position deleted");
                if self.editing_id == Some(id) {
                    self.cancel_edit();
                }
                self.refresh().await
            }
            Err(e) => {
                tracing::warn!(id, "failed to delete position: {}", e);
                self.error = Some(e.user_message());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(PositionInput),
        Update(i64, PositionInput),
        Delete(i64),
    }

    /// In-memory backend that records calls
    #[derive(Default)]
    struct FakePositions {
        rows: Mutex<Vec<Position>>,
        calls: Mutex<Vec<Call>>,
        fail_writes: bool,
    }

    impl FakePositions {
        fn seeded() -> Self {
            let fake = Self::default();
            fake.rows.lock().unwrap().extend([
                Position {
                    position_id: Some(1),
                    position_code: "DEV".to_string(),
                    position_name: "Developer".to_string(),
                },
                Position {
                    position_id: Some(2),
                    position_code: "QA".to_string(),
                    position_name: "Tester".to_string(),
                },
            ]);
            fake
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn rejected() -> ApiError {
            ApiError::Api {
                status: 400,
                message: "position_code must not be empty".to_string(),
            }
        }
    }

    #[async_trait]
    impl PositionsApi for FakePositions {
        async fn list_positions(&self) -> ApiResult<Vec<Position>> {
            self.calls.lock().unwrap().push(Call::List);
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn create_position(&self, input: &PositionInput) -> ApiResult<()> {
            self.calls.lock().unwrap().push(Call::Create(input.clone()));
            if self.fail_writes {
                return Err(Self::rejected());
            }
            let mut rows = self.rows.lock().unwrap();
            let next = rows.iter().filter_map(|p| p.position_id).max().unwrap_or(0) + 1;
            rows.push(Position {
                position_id: Some(next),
                position_code: input.position_code.clone(),
                position_name: input.position_name.clone(),
            });
            Ok(())
        }

        async fn update_position(&self, id: i64, input: &PositionInput) -> ApiResult<()> {
            self.calls.lock().unwrap().push(Call::Update(id, input.clone()));
            if self.fail_writes {
                return Err(Self::rejected());
            }
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|p| p.position_id == Some(id)) {
                row.position_code = input.position_code.clone();
                row.position_name = input.position_name.clone();
            }
            Ok(())
        }

        async fn delete_position(&self, id: i64) -> ApiResult<()> {
            self.calls.lock().unwrap().push(Call::Delete(id));
            self.rows.lock().unwrap().retain(|p| p.position_id != Some(id));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_create_then_refetch() {
        let mut board = PositionsBoard::new(FakePositions::seeded());
        board.refresh().await;
        assert_eq!(board.mode(), FormMode::Create);

        board.form = PositionInput::new("OPS", "Operator");
        assert!(board.submit().await);

        assert_eq!(board.positions.len(), 3);
        assert_eq!(board.form, PositionInput::default());
        assert_eq!(
            board.api().calls(),
            vec![
                Call::List,
                Call::Create(PositionInput::new("OPS", "Operator")),
                Call::List
            ]
        );
    }

    #[tokio::test]
    async fn test_edit_switches_to_update() {
        let mut board = PositionsBoard::new(FakePositions::seeded());
        board.refresh().await;

        assert!(board.begin_edit(2));
        assert_eq!(board.mode(), FormMode::Update(2));
        assert_eq!(board.form, PositionInput::new("QA", "Tester"));

        board.form.position_name = "Quality Engineer".to_string();
        assert!(board.submit().await);

        assert_eq!(board.editing_id, None);
        assert_eq!(board.positions[1].position_name, "Quality Engineer");
        assert!(board
            .api()
            .calls()
            .contains(&Call::Update(2, PositionInput::new("QA", "Quality Engineer"))));
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_id() {
        let mut board = PositionsBoard::new(FakePositions::seeded());
        board.refresh().await;

        assert!(!board.begin_edit(99));
        assert_eq!(board.mode(), FormMode::Create);
        assert_eq!(board.error.as_deref(), Some("Position 99 not found"));

        assert!(board.refresh().await);
        assert_eq!(board.error, None);
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form_and_mode() {
        let fake = FakePositions {
            fail_writes: true,
            ..FakePositions::seeded()
        };
        let mut board = PositionsBoard::new(fake);
        board.refresh().await;
        board.begin_edit(1);
        board.form.position_code = String::new();

        assert!(!board.submit().await);
        assert_eq!(board.error.as_deref(), Some("position_code must not be empty"));
        assert_eq!(board.mode(), FormMode::Update(1));
        assert_eq!(board.form.position_name, "Developer");
        // no refetch after a failure
        assert_eq!(board.api().calls().iter().filter(|c| **c == Call::List).count(), 1);
    }

    #[tokio::test]
    async fn test_empty_form_still_submits() {
        let mut board = PositionsBoard::new(FakePositions::default());
        board.submit().await;
        assert_eq!(board.api().calls()[0], Call::Create(PositionInput::default()));
    }

    #[tokio::test]
    async fn test_delete_leaves_edit_mode_for_that_record() {
        let mut board = PositionsBoard::new(FakePositions::seeded());
        board.refresh().await;
        board.begin_edit(1);

        assert!(board.delete(1).await);
        assert_eq!(board.editing_id, None);
        assert_eq!(board.positions.len(), 1);

        board.begin_edit(2);
        board.delete(1).await;
        assert_eq!(board.editing_id, Some(2));
    }
}
