//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use super::state::MockState;
use crate::{Company, CostCenter, Employee, Phone};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// A complete test scenario with related data.
pub struct DefaultScenario {
    pub companies: Vec<Company>,
    pub cost_centers: Vec<CostCenter>,
    pub employees: Vec<Employee>,
    pub employee_cost_centers: Vec<(i64, Vec<i64>)>,
}

impl Fixtures {
    /// Company every default fixture belongs to.
    pub fn company() -> Company {
        Company {
            id: "47a3083b-5d03-4e05-ad9d-9fd6fddd613e".to_string(),
            name: "99".to_string(),
        }
    }

    /// Create an enabled cost center.
    pub fn cost_center(id: i64, name: &str) -> CostCenter {
        CostCenter {
            id,
            name: name.to_string(),
            enabled: true,
            company: Some(Self::company()),
        }
    }

    /// Create an employee with a valid Brazilian phone number.
    pub fn employee(id: i64, name: &str, national_id: &str) -> Employee {
        let email = format!(
            "{}@empresa.com.br",
            name.to_lowercase().replace(' ', ".")
        );
        Employee {
            id,
            name: name.to_string(),
            email,
            phone: Some(Phone {
                number: "11999999999".to_string(),
                country: "BRA".to_string(),
            }),
            company: Some(Self::company()),
            national_id: national_id.to_string(),
            enabled: true,
            external_id: id * 100,
            categories: vec!["regular-taxi".to_string(), "pop99".to_string()],
            ..Default::default()
        }
    }

    /// The scenario loaded by `MockServer::start`.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            companies: vec![
                Self::company(),
                Company {
                    id: "123".to_string(),
                    name: "Mobilitee".to_string(),
                },
            ],
            cost_centers: vec![
                Self::cost_center(1, "Sales"),
                Self::cost_center(2, "Engineering"),
                Self::cost_center(3, "Sales Support"),
            ],
            employees: vec![
                Self::employee(125, "José Santos", "98765432100"),
                Self::employee(126, "Maria Santos", "12345678900"),
                Self::employee(127, "Ana Lima", "55566677788"),
            ],
            employee_cost_centers: vec![(125, vec![1, 2])],
        }
    }
}

impl From<DefaultScenario> for MockState {
    fn from(scenario: DefaultScenario) -> Self {
        let state = scenario
            .companies
            .into_iter()
            .fold(MockState::new(), MockState::with_company);
        let state = scenario
            .cost_centers
            .into_iter()
            .fold(state, MockState::with_cost_center);
        let state = scenario
            .employees
            .into_iter()
            .fold(state, MockState::with_employee);

        scenario
            .employee_cost_centers
            .into_iter()
            .fold(state, |state, (employee_id, ids)| {
                state.with_employee_cost_centers(employee_id, ids)
            })
    }
}
