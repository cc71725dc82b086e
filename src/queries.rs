//! The three fixed GraphQL documents the viewer sends. None of them take
//! variables.

use const_format::concatcp;

/// Field selection shared by both issue queries.
const ISSUE_FIELDS: &str = r#"
        nodes {
            id
            identifier
            title
            description
            priority
            url
            createdAt
            updatedAt
            state {
                id
                name
                color
                type
            }
            assignee {
                id
                name
                email
                avatarUrl
            }
            project {
                id
                name
                icon
                color
            }
            labels {
                nodes {
                    id
                    name
                    color
                }
            }
            comments {
                nodes {
                    id
                    body
                    createdAt
                    user {
                        id
                        name
                    }
                }
            }
        }
"#;

/// Maximum number of issues fetched per refresh. No cursor is followed.
pub const PAGE_SIZE: u32 = 50;

const PAGE_SIZE_TEXT: &str = "50";

pub const MY_ISSUES_QUERY: &str = concatcp!(
    r#"
query MyIssues {
    issues(
        filter: {
            assignee: { isMe: { eq: true } }
            state: { type: { nin: ["completed", "canceled"] } }
        }
        orderBy: updatedAt
        first: "#,
    PAGE_SIZE_TEXT,
    r#"
    ) {"#,
    ISSUE_FIELDS,
    r#"    }
}
"#
);

pub const ALL_ISSUES_QUERY: &str = concatcp!(
    r#"
query AllIssues {
    issues(
        filter: {
            state: { type: { nin: ["completed", "canceled"] } }
        }
        orderBy: updatedAt
        first: "#,
    PAGE_SIZE_TEXT,
    r#"
    ) {"#,
    ISSUE_FIELDS,
    r#"    }
}
"#
);

pub const VIEWER_QUERY: &str = r#"
query Viewer {
    viewer {
        id
        name
        email
    }
}
"#;
