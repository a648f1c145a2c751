//! Mock server state management.
//!
//! Provides the in-memory data store for the mock 99 API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Company, CostCenter, Employee};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Companies visible to the API key.
    pub companies: Vec<Company>,

    /// Cost centers indexed by ID.
    pub cost_centers: BTreeMap<i64, CostCenter>,

    /// Employees indexed by ID.
    pub employees: BTreeMap<i64, Employee>,

    /// Cost center IDs assigned to each employee.
    pub employee_cost_centers: HashMap<i64, Vec<i64>>,

    /// Optional API key. If set, requests must send it in `x-api-key`.
    pub required_api_key: Option<String>,

    /// Value of `x-company-id` on the most recent request, if any.
    pub last_company_id: Option<String>,

    next_id: i64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a company to the state.
    pub fn with_company(mut self, company: Company) -> Self {
        self.companies.push(company);
        self
    }

    /// Add a cost center to the state.
    pub fn with_cost_center(mut self, cost_center: CostCenter) -> Self {
        self.bump_next_id(cost_center.id);
        self.cost_centers.insert(cost_center.id, cost_center);
        self
    }

    /// Add an employee to the state.
    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.bump_next_id(employee.id);
        self.employees.insert(employee.id, employee);
        self
    }

    /// Assign cost centers to an employee.
    pub fn with_employee_cost_centers(mut self, employee_id: i64, ids: Vec<i64>) -> Self {
        self.employee_cost_centers.insert(employee_id, ids);
        self
    }

    /// Set the required API key.
    pub fn with_required_api_key(mut self, api_key: &str) -> Self {
        self.required_api_key = Some(api_key.to_string());
        self
    }

    fn bump_next_id(&mut self, id: i64) {
        self.next_id = self.next_id.max(id);
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// List cost centers, optionally filtered by a case-insensitive name search.
    pub fn list_cost_centers(&self, search: Option<&str>) -> Vec<&CostCenter> {
        self.cost_centers
            .values()
            .filter(|cc| matches_search(&cc.name, search))
            .collect()
    }

    /// Store a new cost center and return it with its assigned ID.
    pub fn create_cost_center(&mut self, mut cost_center: CostCenter) -> &CostCenter {
        let id = self.allocate_id();
        cost_center.id = id;
        cost_center.enabled = true;
        self.cost_centers.entry(id).or_insert(cost_center)
    }

    /// Remove a cost center. Returns false if it did not exist.
    pub fn remove_cost_center(&mut self, id: i64) -> bool {
        self.cost_centers.remove(&id).is_some()
    }

    /// List employees, optionally filtered by name search and national ID.
    pub fn list_employees(
        &self,
        search: Option<&str>,
        national_id: Option<&str>,
    ) -> Vec<&Employee> {
        self.employees
            .values()
            .filter(|e| matches_search(&e.name, search))
            .filter(|e| national_id.map_or(true, |n| e.national_id == n))
            .collect()
    }

    /// Get an employee by ID.
    pub fn get_employee(&self, id: i64) -> Option<&Employee> {
        self.employees.get(&id)
    }

    /// Employees registered with an external ID.
    pub fn employees_by_external_id(&self, external_id: i64) -> Vec<&Employee> {
        self.employees
            .values()
            .filter(|e| e.external_id == external_id)
            .collect()
    }

    /// Store a new employee and return it with its assigned ID.
    pub fn create_employee(&mut self, mut employee: Employee) -> &Employee {
        let id = self.allocate_id();
        employee.id = id;
        employee.enabled = true;
        self.employees.entry(id).or_insert(employee)
    }

    /// Replace an existing employee, keeping its ID.
    pub fn update_employee(&mut self, id: i64, mut employee: Employee) -> Option<&Employee> {
        let existing = self.employees.get_mut(&id)?;
        employee.id = id;
        *existing = employee;
        Some(&*existing)
    }

    /// Remove an employee. Returns false if it did not exist.
    pub fn remove_employee(&mut self, id: i64) -> bool {
        self.employee_cost_centers.remove(&id);
        self.employees.remove(&id).is_some()
    }

    /// Cost centers assigned to an employee.
    pub fn employee_cost_centers(&self, employee_id: i64) -> Vec<&CostCenter> {
        self.employee_cost_centers
            .get(&employee_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.cost_centers.get(id))
            .collect()
    }

    /// Replace the cost centers of an employee, keeping only known IDs.
    pub fn set_employee_cost_centers(&mut self, employee_id: i64, ids: &[i64]) -> Vec<i64> {
        let known: Vec<i64> = ids
            .iter()
            .copied()
            .filter(|id| self.cost_centers.contains_key(id))
            .collect();
        self.employee_cost_centers.insert(employee_id, known.clone());
        known
    }
}

fn matches_search(name: &str, search: Option<&str>) -> bool {
    search
        .map(|s| name.to_lowercase().contains(&s.to_lowercase()))
        .unwrap_or(true)
}
