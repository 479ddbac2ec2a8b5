//! Document analysis
//!
//! Pure text-to-record extraction for uploaded financial documents:
//! sniff the document kind from filename and content, pull numeric fields
//! out with regular expressions, then derive insights and recommendations.
//! Absent fields are explicit `None`s, never silently dropped keys.
//!
//! Heuristic by nature — these are plain-text pattern matches, not OCR.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Form16,
    SalarySlip,
    LoanStatement,
    InvestmentStatement,
    Other,
}

/// Fields extracted from a document, one variant per document kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "document_type", rename_all = "snake_case")]
pub enum ExtractedData {
    Form16 {
        gross_salary: Option<f64>,
        tax_deducted: Option<f64>,
        financial_year: Option<String>,
        employer_name: Option<String>,
    },
    SalarySlip {
        gross_salary: Option<f64>,
        tax_deducted: Option<f64>,
    },
    LoanStatement {
        loan_amount: Option<f64>,
        emi_amount: Option<f64>,
        interest_rate: Option<f64>,
    },
    InvestmentStatement {
        investment_amount: Option<f64>,
        gains: Option<f64>,
    },
    Other,
}

/// Full analysis result for one uploaded document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub kind: DocumentKind,
    pub data: ExtractedData,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

lazy_static! {
    static ref SALARY_RE: Regex =
        Regex::new(r"(?i)(?:gross salary|gross income).*?(\d+(?:,\d+)*(?:\.\d+)?)").unwrap();
    static ref TAX_RE: Regex =
        Regex::new(r"(?i)(?:tax deducted|tds).*?(\d+(?:,\d+)*(?:\.\d+)?)").unwrap();
    static ref LOAN_RE: Regex =
        Regex::new(r"(?i)(?:loan amount|principal).*?(\d+(?:,\d+)*(?:\.\d+)?)").unwrap();
    static ref EMI_RE: Regex =
        Regex::new(r"(?i)(?:emi|monthly payment).*?(\d+(?:,\d+)*(?:\.\d+)?)").unwrap();
    static ref RATE_RE: Regex =
        Regex::new(r"(?i)(?:interest rate|rate of interest).*?(\d+(?:\.\d+)?)").unwrap();
    static ref INVESTMENT_RE: Regex =
        Regex::new(r"(?i)(?:investment amount|amount invested|invested).*?(\d+(?:,\d+)*(?:\.\d+)?)")
            .unwrap();
    static ref GAINS_RE: Regex =
        Regex::new(r"(?i)(?:total gains?|returns?).*?(\d+(?:,\d+)*(?:\.\d+)?)").unwrap();
    static ref FY_RE: Regex =
        Regex::new(r"(?i)(?:financial year|fy|assessment year).*?(\d{4}-\d{2,4})").unwrap();
    static ref EMPLOYER_RE: Regex =
        Regex::new(r"(?i)(?:employer|company name)\s*[:\-]?\s*([A-Za-z][A-Za-z\s&]+)").unwrap();
}

/// Analyze an uploaded document end to end.
pub fn analyze_document(file_name: &str, content: &str) -> DocumentAnalysis {
    let kind = detect_kind(file_name, content);
    let data = extract_fields(content, kind);
    let insights = derive_insights(&data);
    let recommendations = derive_recommendations(kind);

    DocumentAnalysis {
        kind,
        data,
        insights,
        recommendations,
    }
}

/// Sniff the document kind from the filename first, then the content.
pub fn detect_kind(file_name: &str, content: &str) -> DocumentKind {
    let name = file_name.to_lowercase();
    let text = content.to_lowercase();

    if name.contains("form16") || name.contains("form-16") || text.contains("form 16") {
        DocumentKind::Form16
    } else if name.contains("salary")
        || text.contains("salary slip")
        || text.contains("pay slip")
    {
        DocumentKind::SalarySlip
    } else if name.contains("loan") || text.contains("loan statement") || text.contains("emi") {
        DocumentKind::LoanStatement
    } else if text.contains("investment")
        || text.contains("mutual fund")
        || text.contains("portfolio")
    {
        DocumentKind::InvestmentStatement
    } else {
        DocumentKind::Other
    }
}

/// Pull the fields relevant to `kind` out of the raw text.
pub fn extract_fields(content: &str, kind: DocumentKind) -> ExtractedData {
    match kind {
        DocumentKind::Form16 => ExtractedData::Form16 {
            gross_salary: capture_number(&SALARY_RE, content),
            tax_deducted: capture_number(&TAX_RE, content),
            financial_year: capture_text(&FY_RE, content),
            employer_name: capture_text(&EMPLOYER_RE, content),
        },
        DocumentKind::SalarySlip => ExtractedData::SalarySlip {
            gross_salary: capture_number(&SALARY_RE, content),
            tax_deducted: capture_number(&TAX_RE, content),
        },
        DocumentKind::LoanStatement => ExtractedData::LoanStatement {
            loan_amount: capture_number(&LOAN_RE, content),
            emi_amount: capture_number(&EMI_RE, content),
            interest_rate: capture_number(&RATE_RE, content),
        },
        DocumentKind::InvestmentStatement => ExtractedData::InvestmentStatement {
            investment_amount: capture_number(&INVESTMENT_RE, content),
            gains: capture_number(&GAINS_RE, content),
        },
        DocumentKind::Other => ExtractedData::Other,
    }
}

fn capture_number(re: &Regex, content: &str) -> Option<f64> {
    let raw = re.captures(content)?.get(1)?.as_str().replace(',', "");
    raw.parse::<f64>().ok()
}

fn capture_text(re: &Regex, content: &str) -> Option<String> {
    let raw = re.captures(content)?.get(1)?.as_str().trim().to_string();
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

fn derive_insights(data: &ExtractedData) -> Vec<String> {
    let mut insights = Vec::new();

    match data {
        ExtractedData::Form16 {
            gross_salary: Some(salary),
            tax_deducted: Some(tax),
            ..
        } => {
            let tax_rate = tax / salary * 100.0;
            insights.push(format!("Your effective tax rate is {:.1}%", tax_rate));

            if tax_rate > 20.0 {
                insights.push(
                    "Your tax rate is quite high - consider tax-saving investments".to_string(),
                );
            }
            if *salary > 1_000_000.0 {
                insights.push(
                    "You're in the highest tax bracket - maximize 80C deductions".to_string(),
                );
            }
        }
        ExtractedData::LoanStatement {
            loan_amount: Some(loan),
            interest_rate: Some(rate),
            ..
        } => {
            if *rate > 8.0 {
                insights.push(
                    "Your loan interest rate is above market average - consider refinancing"
                        .to_string(),
                );
            }
            if *loan > 5_000_000.0 {
                insights.push(
                    "Consider claiming tax benefits under Section 24(b) for home loan interest"
                        .to_string(),
                );
            }
        }
        ExtractedData::SalarySlip {
            gross_salary: Some(salary),
            ..
        } => {
            let monthly_savings_target = salary * 0.2;
            insights.push(format!(
                "Target monthly savings: ₹{:.0}",
                monthly_savings_target
            ));
        }
        _ => {}
    }

    insights
}

fn derive_recommendations(kind: DocumentKind) -> Vec<String> {
    match kind {
        DocumentKind::Form16 => vec![
            "Maximize Section 80C investments (₹1.5L limit)".to_string(),
            "Consider health insurance for 80D benefits".to_string(),
            "Explore ELSS mutual funds for tax savings".to_string(),
        ],
        DocumentKind::LoanStatement => vec![
            "Track loan payments for tax benefits".to_string(),
            "Consider prepayment if you have surplus funds".to_string(),
            "Review loan terms annually for better rates".to_string(),
        ],
        DocumentKind::SalarySlip => vec![
            "Set up automatic SIP investments".to_string(),
            "Build an emergency fund (6-12 months expenses)".to_string(),
            "Review salary structure for tax optimization".to_string(),
        ],
        DocumentKind::InvestmentStatement | DocumentKind::Other => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind_from_filename() {
        assert_eq!(detect_kind("form16-2024.pdf", ""), DocumentKind::Form16);
        assert_eq!(detect_kind("salary_march.txt", ""), DocumentKind::SalarySlip);
        assert_eq!(detect_kind("home_loan.csv", ""), DocumentKind::LoanStatement);
        assert_eq!(detect_kind("notes.txt", "misc text"), DocumentKind::Other);
    }

    #[test]
    fn test_detect_kind_from_content() {
        assert_eq!(
            detect_kind("doc.txt", "Form 16 issued for FY 2023-24"),
            DocumentKind::Form16
        );
        assert_eq!(
            detect_kind("doc.txt", "your mutual fund portfolio statement"),
            DocumentKind::InvestmentStatement
        );
    }

    #[test]
    fn test_extract_salary_slip_fields() {
        let content = "Pay slip for March\nGross Salary: 85,000\nTax Deducted: 6,500";
        let data = extract_fields(content, DocumentKind::SalarySlip);

        assert_eq!(
            data,
            ExtractedData::SalarySlip {
                gross_salary: Some(85_000.0),
                tax_deducted: Some(6_500.0),
            }
        );
    }

    #[test]
    fn test_extract_loan_statement_fields() {
        let content =
            "Loan Statement\nLoan Amount: 25,00,000\nEMI: 21,696\nInterest Rate: 8.5% p.a.";
        let data = extract_fields(content, DocumentKind::LoanStatement);

        match data {
            ExtractedData::LoanStatement {
                loan_amount,
                emi_amount,
                interest_rate,
            } => {
                assert_eq!(loan_amount, Some(2_500_000.0));
                assert_eq!(emi_amount, Some(21_696.0));
                assert_eq!(interest_rate, Some(8.5));
            }
            other => panic!("unexpected extraction: {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_are_none() {
        let data = extract_fields("nothing useful here", DocumentKind::SalarySlip);
        assert_eq!(
            data,
            ExtractedData::SalarySlip {
                gross_salary: None,
                tax_deducted: None,
            }
        );
    }

    #[test]
    fn test_form16_insights() {
        let content = "Form 16\nGross Income: 15,00,000\nTDS: 3,50,000\nFinancial Year: 2023-24";
        let analysis = analyze_document("form16.txt", content);

        assert_eq!(analysis.kind, DocumentKind::Form16);
        assert!(analysis
            .insights
            .iter()
            .any(|i| i.contains("effective tax rate")));
        // 23.3% rate and >10L salary both trigger
        assert!(analysis.insights.iter().any(|i| i.contains("quite high")));
        assert!(analysis
            .insights
            .iter()
            .any(|i| i.contains("highest tax bracket")));
        assert!(!analysis.recommendations.is_empty());
    }

    #[test]
    fn test_salary_slip_savings_target() {
        let content = "Salary Slip\nGross Salary: 100000";
        let analysis = analyze_document("march.txt", content);

        assert_eq!(analysis.kind, DocumentKind::SalarySlip);
        assert!(analysis
            .insights
            .iter()
            .any(|i| i.contains("Target monthly savings") && i.contains("20000")));
    }

    #[test]
    fn test_other_document_has_no_derived_output() {
        let analysis = analyze_document("random.txt", "grocery list");
        assert_eq!(analysis.kind, DocumentKind::Other);
        assert_eq!(analysis.data, ExtractedData::Other);
        assert!(analysis.insights.is_empty());
        assert!(analysis.recommendations.is_empty());
    }
}
