//! A scripted in-memory driver for execution-path tests.
//!
//! `MockConn` records every statement, commit, and rollback, hands back
//! queued result sets in order, and can be told to fail the n-th execute
//! call. It implements the `Connection`/`Cursor` seam with interior
//! mutability so tests can share one connection across builders and a
//! pending transaction, exactly like a real driver handle.

use myorm::{Connection, Cursor, DriverResult, Row, Value};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Default)]
struct State {
    executed: Vec<(String, Vec<Value>)>,
    results: VecDeque<Vec<Row>>,
    fail_on: Option<usize>,
    fail_rollback: bool,
    commits: usize,
    rollbacks: usize,
    closed: bool,
    next_insert_id: u64,
    last_insert_id: Option<u64>,
}

#[derive(Default)]
pub struct MockConn {
    state: RefCell<State>,
}

impl MockConn {
    pub fn new() -> Self {
        let conn = Self::default();
        conn.state.borrow_mut().next_insert_id = 1;
        conn
    }

    /// Queue a result set for the next query, in call order.
    pub fn queue_result(&self, rows: Vec<Row>) {
        self.state.borrow_mut().results.push_back(rows);
    }

    /// Make the `index`-th (0-based) execute call fail.
    pub fn fail_on_execute(&self, index: usize) {
        self.state.borrow_mut().fail_on = Some(index);
    }

    /// Make every rollback fail.
    pub fn fail_on_rollback(&self) {
        self.state.borrow_mut().fail_rollback = true;
    }

    pub fn executed(&self) -> Vec<(String, Vec<Value>)> {
        self.state.borrow().executed.clone()
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.state
            .borrow()
            .executed
            .iter()
            .map(|(sql, _)| sql.clone())
            .collect()
    }

    pub fn commits(&self) -> usize {
        self.state.borrow().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.state.borrow().rollbacks
    }

    pub fn closed(&self) -> bool {
        self.state.borrow().closed
    }
}

pub struct MockCursor<'a> {
    conn: &'a MockConn,
    pending: Vec<Row>,
}

impl MockCursor<'_> {
    fn run(&mut self, sql: &str, params: Vec<Value>) -> DriverResult<u64> {
        let mut state = self.conn.state.borrow_mut();
        let index = state.executed.len();
        state.executed.push((sql.to_string(), params));
        if state.fail_on == Some(index) {
            return Err("scripted failure".into());
        }
        if sql.starts_with("INSERT") {
            let id = state.next_insert_id;
            state.next_insert_id += 1;
            state.last_insert_id = Some(id);
        }
        self.pending = state.results.pop_front().unwrap_or_default();
        Ok(1)
    }
}

impl Cursor for MockCursor<'_> {
    fn execute(&mut self, sql: &str, params: &[Value]) -> DriverResult<u64> {
        self.run(sql, params.to_vec())
    }

    fn execute_many(&mut self, sql: &str, rows: &[Vec<Value>]) -> DriverResult<u64> {
        let mut affected = 0;
        for row in rows {
            affected += self.run(sql, row.clone())?;
        }
        Ok(affected)
    }

    fn fetch_one(&mut self) -> DriverResult<Option<Row>> {
        if self.pending.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.pending.remove(0)))
        }
    }

    fn fetch_all(&mut self) -> DriverResult<Vec<Row>> {
        Ok(std::mem::take(&mut self.pending))
    }

    fn last_insert_id(&self) -> Option<u64> {
        self.conn.state.borrow().last_insert_id
    }
}

impl Connection for MockConn {
    fn cursor(&self) -> DriverResult<Box<dyn Cursor + '_>> {
        Ok(Box::new(MockCursor {
            conn: self,
            pending: Vec::new(),
        }))
    }

    fn commit(&self) -> DriverResult<()> {
        self.state.borrow_mut().commits += 1;
        Ok(())
    }

    fn rollback(&self) -> DriverResult<()> {
        let mut state = self.state.borrow_mut();
        state.rollbacks += 1;
        if state.fail_rollback {
            return Err("rollback refused".into());
        }
        Ok(())
    }

    fn close(&self) -> DriverResult<()> {
        self.state.borrow_mut().closed = true;
        Ok(())
    }
}
