//! Bundled role catalog used when no catalog file is configured or it fails to load

use crate::catalog::role::{Importance, RoleProfile};

const BUILTIN_ROLES: &[(&str, &str, Importance)] = &[
    (
        "Data Analyst",
        "SQL, Excel, Power BI, Tableau, Python, data visualization, statistics, dashboards, data cleaning, reporting",
        Importance::High,
    ),
    (
        "Data Scientist",
        "Python, R, machine learning, deep learning, statistics, pandas, scikit-learn, SQL, feature engineering, A/B testing",
        Importance::High,
    ),
    (
        "Backend Developer",
        "Java, Python, Go, REST, API, SQL, PostgreSQL, Docker, microservices, Git, unit testing",
        Importance::High,
    ),
    (
        "Frontend Developer",
        "JavaScript, TypeScript, React, HTML, CSS, responsive design, accessibility, Git, testing, webpack",
        Importance::Medium,
    ),
    (
        "DevOps Engineer",
        "Linux, Docker, Kubernetes, Terraform, AWS, CI/CD, monitoring, Bash, Ansible, infrastructure as code",
        Importance::High,
    ),
    (
        "Project Manager",
        "project management, Agile, Scrum, stakeholder management, budgeting, risk management, Jira, planning, communication, leadership",
        Importance::Medium,
    ),
    (
        "UX Designer",
        "Figma, user research, wireframing, prototyping, usability testing, design systems, accessibility, interaction design",
        Importance::Medium,
    ),
    (
        "Digital Marketing Specialist",
        "SEO, SEM, Google Analytics, content marketing, social media, email marketing, copywriting, campaign management",
        Importance::Low,
    ),
    (
        "Sales Representative",
        "negotiation, CRM, prospecting, customer service, communication, sales targets, lead generation, Salesforce",
        Importance::Low,
    ),
    (
        "Administrative Assistant",
        "Microsoft Office, Excel, scheduling, customer service, data entry, organization, communication, filing",
        Importance::Low,
    ),
];

pub fn builtin_roles() -> Vec<RoleProfile> {
    BUILTIN_ROLES
        .iter()
        .map(|(name, keywords, importance)| RoleProfile::from_keyword_list(*name, keywords, *importance))
        .collect()
}
