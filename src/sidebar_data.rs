// src/sidebar_data.rs
//! ポータル組み込みのサイドバー定義。
//!
//! リンクは `all_routes` 側のシンボル名のまま持ち、パスへの変換は
//! 呼び出し側 (`resolver::RouteTable`) に任せる。

use once_cell::sync::Lazy;

use crate::model::NavigationNode;

const STAFF: [&str; 3] = ["superadmin", "admin", "teacher"];
const ADMINS: [&str; 2] = ["superadmin", "admin"];

static SIDEBAR_DATA: Lazy<Vec<NavigationNode>> = Lazy::new(build);

/// プロセス全体で共有する読み取り専用の定義
pub fn sidebar_data() -> &'static [NavigationNode] {
    &SIDEBAR_DATA
}

fn build() -> Vec<NavigationNode> {
    vec![
        NavigationNode::section(
            "Main",
            vec![NavigationNode::home("Dashboard").with_icon("layout-dashboard")],
        ),
        NavigationNode::section(
            "Academic",
            vec![
                NavigationNode::container(
                    "Classes",
                    vec![
                        NavigationNode::link("All Classes", "classList"),
                        NavigationNode::link("Sections", "classSection"),
                        NavigationNode::link("Sessions", "session").with_roles(["superadmin"]),
                    ],
                )
                .with_icon("school")
                .with_roles(STAFF),
                NavigationNode::link("Time Table", "classTimetable").with_icon("table"),
                NavigationNode::link("Subjects", "classSubject")
                    .with_icon("book")
                    .with_roles(STAFF),
                NavigationNode::link("Homework", "classHomeWork").with_icon("license"),
            ],
        ),
        NavigationNode::section(
            "People",
            vec![
                NavigationNode::container(
                    "Students",
                    vec![
                        NavigationNode::link("All Students", "studentGrid"),
                        NavigationNode::link("Add Student", "addStudent").with_roles(ADMINS),
                    ],
                )
                .with_icon("school")
                .with_roles(STAFF),
                NavigationNode::container(
                    "Teachers",
                    vec![
                        NavigationNode::link("All Teachers", "teacherGrid"),
                        NavigationNode::link("Add Teacher", "addTeacher"),
                    ],
                )
                .with_icon("users")
                .with_roles(ADMINS),
                NavigationNode::container(
                    "Parents",
                    vec![NavigationNode::link("All Parents", "parentGrid")],
                )
                .with_icon("user-bolt")
                .with_roles(STAFF),
            ],
        )
        .with_roles(STAFF),
        NavigationNode::section(
            "Daily",
            vec![
                NavigationNode::container(
                    "Attendance",
                    vec![
                        NavigationNode::link("Student Attendance", "studentAttendance")
                            .with_roles(STAFF),
                        NavigationNode::link("Staff Attendance", "staffAttendance")
                            .with_roles(ADMINS),
                        NavigationNode::link("My Attendance", "myAttendance")
                            .with_roles(["student", "parent"]),
                    ],
                )
                .with_icon("calendar-check"),
                NavigationNode::link("Messages", "messages").with_icon("message"),
                NavigationNode::link("Albums", "albums").with_icon("photo"),
                NavigationNode::link("Notice Board", "noticeBoard").with_icon("clipboard"),
            ],
        ),
        NavigationNode::section(
            "Finance",
            vec![
                NavigationNode::container(
                    "Fees",
                    vec![
                        NavigationNode::link("Fees Group", "feesGroup").with_roles(ADMINS),
                        NavigationNode::link("Fees Type", "feesType").with_roles(ADMINS),
                        NavigationNode::link("Collect Fees", "collectFees").with_roles(ADMINS),
                        NavigationNode::link("Fee Status", "feeStatus")
                            .with_roles(["student", "parent"]),
                    ],
                )
                .with_icon("report-money"),
            ],
        )
        .with_roles(["superadmin", "admin", "student", "parent"]),
        NavigationNode::section(
            "Front Office",
            vec![NavigationNode::link("Enquiries", "enquiries").with_icon("help")],
        )
        .with_roles(ADMINS),
        NavigationNode::section(
            "Management",
            vec![
                NavigationNode::link("Branches", "branchList").with_icon("building"),
                NavigationNode::link("Add Branch", "addBranch").with_icon("building-plus"),
                NavigationNode::link("Branch Admins", "branchAdmins").with_icon("user-shield"),
            ],
        )
        .with_roles(["superadmin"]),
    ]
}
