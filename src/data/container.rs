use std::time::Instant;

/// Column delimiter used by `distrobox-list`.
const CELL_DELIMITER: &str = " | ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerColumn {
    Id,
    Name,
    Status,
    Mem,
    Cpu,
    Image,
}

impl ContainerColumn {
    pub const ALL: [ContainerColumn; 6] = [
        ContainerColumn::Id,
        ContainerColumn::Name,
        ContainerColumn::Status,
        ContainerColumn::Mem,
        ContainerColumn::Cpu,
        ContainerColumn::Image,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContainerColumn::Id => "ID",
            ContainerColumn::Name => "NAME",
            ContainerColumn::Status => "STATUS",
            ContainerColumn::Mem => "MEM",
            ContainerColumn::Cpu => "CPU%",
            ContainerColumn::Image => "IMAGE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ID" | "CONTAINER ID" => Some(ContainerColumn::Id),
            "NAME" | "NAMES" => Some(ContainerColumn::Name),
            "STATUS" => Some(ContainerColumn::Status),
            "MEM" | "MEM%" | "MEMORY" => Some(ContainerColumn::Mem),
            "CPU" | "CPU%" => Some(ContainerColumn::Cpu),
            "IMAGE" => Some(ContainerColumn::Image),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerRow {
    pub id: String,
    pub name: String,
    pub status: String,
    pub mem: String,
    pub cpu: String,
    pub image: String,
}

impl ContainerRow {
    pub fn cell(&self, column: ContainerColumn) -> &str {
        match column {
            ContainerColumn::Id => &self.id,
            ContainerColumn::Name => &self.name,
            ContainerColumn::Status => &self.status,
            ContainerColumn::Mem => &self.mem,
            ContainerColumn::Cpu => &self.cpu,
            ContainerColumn::Image => &self.image,
        }
    }

    fn cell_mut(&mut self, column: ContainerColumn) -> &mut String {
        match column {
            ContainerColumn::Id => &mut self.id,
            ContainerColumn::Name => &mut self.name,
            ContainerColumn::Status => &mut self.status,
            ContainerColumn::Mem => &mut self.mem,
            ContainerColumn::Cpu => &mut self.cpu,
            ContainerColumn::Image => &mut self.image,
        }
    }

    pub fn is_running(&self) -> bool {
        let status = self.status.to_ascii_lowercase();
        status.starts_with("up") || status.starts_with("running")
    }
}

/// One poll of the list command.
#[derive(Clone, Debug)]
pub struct ListSnapshot {
    pub rows: Vec<ContainerRow>,
    pub error: Option<String>,
    pub taken_at: Instant,
}

impl ListSnapshot {
    pub fn ok(rows: Vec<ContainerRow>) -> Self {
        Self {
            rows,
            error: None,
            taken_at: Instant::now(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            error: Some(error.into()),
            taken_at: Instant::now(),
        }
    }
}

/// Parses `distrobox-list --no-color` output into rows.
///
/// The first line is the header. Columns are matched by header name, falling
/// back to ID, NAME, STATUS, MEM, CPU%, IMAGE order when the header names none
/// of them.
pub fn parse_list_output(output: &str) -> Vec<ContainerRow> {
    let mut lines = output.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let layout = column_layout(header);

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut row = ContainerRow::default();
            for (cell, column) in line.split(CELL_DELIMITER).zip(layout.iter()) {
                if let Some(column) = column {
                    *row.cell_mut(*column) = cell.trim().to_string();
                }
            }
            row
        })
        .collect()
}

fn column_layout(header: &str) -> Vec<Option<ContainerColumn>> {
    let named = header
        .split(CELL_DELIMITER)
        .map(ContainerColumn::parse)
        .collect::<Vec<_>>();
    if named.iter().any(Option::is_some) {
        named
    } else {
        ContainerColumn::ALL.iter().copied().map(Some).collect()
    }
}
