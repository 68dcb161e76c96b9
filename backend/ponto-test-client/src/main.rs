// src/main.rs

use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::error::Error;

// Response types
#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct EmployeeSummary {
    cpf: String,
    name: String,
    role: String,
    department: String,
}

#[derive(Debug, Deserialize)]
struct DayRow {
    day: u8,
    check_in: String,
    check_out: String,
    worked_minutes: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct EmployeeDetail {
    employee: EmployeeSummary,
    days: Vec<DayRow>,
    total: String,
}

#[derive(Debug, Deserialize)]
struct ReportResponse {
    employee_count: usize,
    document: serde_json::Value,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let base_url = env::var("PONTO_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let month = env::args().nth(1).unwrap_or_else(|| "janeiro".to_string());
    let year = env::args().nth(2).unwrap_or_else(|| "2025".to_string());
    let client = Client::new();

    // Test 1: Health check
    println!("\n🔍 Testing health check endpoint...");
    let health_response = client
        .get(format!("{}/health", base_url))
        .send()
        .await?
        .json::<HealthResponse>()
        .await?;
    println!("Health check response: {:?}", health_response);

    // Test 2: Employee listing
    println!("\n🔍 Testing employee listing for {}/{}...", month, year);
    let listing_response = client
        .get(format!("{}/api/records", base_url))
        .query(&[("month", month.as_str()), ("year", year.as_str())])
        .send()
        .await?;
    println!("Listing status: {}", listing_response.status());

    if !listing_response.status().is_success() {
        println!("Failed to list employees: {}", listing_response.text().await?);
        return Ok(());
    }
    let employees = listing_response.json::<Vec<EmployeeSummary>>().await?;
    for employee in &employees {
        println!(
            "  {} | {} | {} | {}",
            employee.cpf, employee.name, employee.role, employee.department
        );
    }

    // Test 3: Details for the first employee
    if let Some(first) = employees.first() {
        println!("\n🔍 Testing details endpoint for CPF {}...", first.cpf);
        let detail_response = client
            .get(format!("{}/api/records/{}", base_url, first.cpf))
            .query(&[("month", month.as_str()), ("year", year.as_str())])
            .send()
            .await?;
        println!("Details status: {}", detail_response.status());

        if detail_response.status().is_success() {
            let detail = detail_response.json::<EmployeeDetail>().await?;
            println!("Employee: {} ({})", detail.employee.name, detail.employee.role);
            for row in detail.days.iter().filter(|d| d.worked_minutes.is_some()) {
                println!(
                    "  Dia {:>2}: {} - {} ({} min)",
                    row.day,
                    row.check_in,
                    row.check_out,
                    row.worked_minutes.unwrap_or_default()
                );
            }
            println!("Total: {}", detail.total);
        } else {
            println!("Failed to get details: {}", detail_response.text().await?);
        }
    }

    // Test 4: Full report
    println!("\n🔍 Testing report endpoint...");
    let report_response = client
        .get(format!("{}/api/report", base_url))
        .query(&[("month", month.as_str()), ("year", year.as_str())])
        .send()
        .await?;
    println!("Report status: {}", report_response.status());

    if report_response.status().is_success() {
        let report = report_response.json::<ReportResponse>().await?;
        let pages = report.document["pages"].as_array().map(Vec::len).unwrap_or(0);
        println!(
            "Report: {} employees, {} pages",
            report.employee_count, pages
        );
    } else {
        println!("Failed to get report: {}", report_response.text().await?);
    }

    println!("\n✅ Test client completed");
    Ok(())
}
