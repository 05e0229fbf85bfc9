// ==========================================
// 营销活动数据导入 - 线索字段同义词表
// ==========================================
// 职责: PT/EN 多版本导出的列名 → 统一线索字段
// 规则: 同义词按顺序查找，第一个非空值生效；全部缺失返回 None
// ==========================================

use std::collections::HashMap;

/// 一个统一字段及其列名同义词（按优先级排序）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSynonyms {
    pub field: &'static str,
    pub columns: &'static [&'static str],
}

impl FieldSynonyms {
    /// 在行记录中查找第一个非空同义列的值（已去首尾空白）
    pub fn lookup<'a>(&self, row: &'a HashMap<String, String>) -> Option<&'a str> {
        self.columns.iter().find_map(|column| {
            row.get(*column)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        })
    }

    /// 查找并转为 String
    pub fn lookup_owned(&self, row: &HashMap<String, String>) -> Option<String> {
        self.lookup(row).map(str::to_string)
    }

    /// 布尔标记: 仅精确的 "Sim" / "Yes" 为 true
    pub fn lookup_flag(&self, row: &HashMap<String, String>) -> bool {
        matches!(self.lookup(row), Some("Sim") | Some("Yes"))
    }
}

// ===== 基础字段 =====

pub const CAMPAIGN: FieldSynonyms = FieldSynonyms {
    field: "campaign",
    columns: &["Campaign", "Campanha", "campaign", "campanha", "Campaign Name"],
};

pub const LINKEDIN: FieldSynonyms = FieldSynonyms {
    field: "linkedin",
    columns: &["LinkedIn", "Linkedin", "linkedin", "linkedin_url", "LinkedIn URL", "Profile URL"],
};

pub const NAME: FieldSynonyms = FieldSynonyms {
    field: "name",
    columns: &["Nome", "Name", "nome", "name", "Full Name", "Nome Completo", "Lead"],
};

pub const FIRST_NAME: FieldSynonyms = FieldSynonyms {
    field: "first_name",
    columns: &["First Name", "first_name", "firstName", "Primeiro Nome"],
};

pub const LAST_NAME: FieldSynonyms = FieldSynonyms {
    field: "last_name",
    columns: &["Last Name", "last_name", "lastName", "Sobrenome"],
};

pub const POSITION: FieldSynonyms = FieldSynonyms {
    field: "position",
    columns: &["Cargo", "Position", "cargo", "position", "Title", "Job Title"],
};

pub const COMPANY: FieldSynonyms = FieldSynonyms {
    field: "company",
    columns: &["Empresa", "Company", "empresa", "company", "Company Name"],
};

pub const SOURCE: FieldSynonyms = FieldSynonyms {
    field: "source",
    columns: &["Origem", "Source", "origem", "source"],
};

pub const CONNECTED_AT: FieldSynonyms = FieldSynonyms {
    field: "connection_date",
    columns: &["Connected At", "connected_at", "Data Conexão", "Data Conexao"],
};

pub const SEQUENCE_DATE: FieldSynonyms = FieldSynonyms {
    field: "sequence_date",
    columns: &["Sequence Generated At", "sequence_generated_at", "Data Sequência", "Data Sequencia"],
};

pub const MESSAGES: FieldSynonyms = FieldSynonyms {
    field: "messages",
    columns: &["Messages", "messages", "Mensagens"],
};

// ===== 回复信号 =====

pub const POSITIVE_RESPONSE_DATE: FieldSynonyms = FieldSynonyms {
    field: "positive_response_date",
    columns: &["Data Resposta Positiva", "Positive Response Date", "data_resposta_positiva"],
};

pub const NEGATIVE_RESPONSE_DATE: FieldSynonyms = FieldSynonyms {
    field: "negative_response_date",
    columns: &["Data Resposta Negativa", "Negative Response Date", "data_resposta_negativa"],
};

// ===== 状态相关字段 =====

pub const TRANSFER_DATE: FieldSynonyms = FieldSynonyms {
    field: "transfer_date",
    columns: &["Data Repasse", "Transfer Date", "data_repasse"],
};

pub const STATUS_DETAILS: FieldSynonyms = FieldSynonyms {
    field: "status_details",
    columns: &["Status", "Detalhes Status", "Status Details"],
};

pub const PHONE: FieldSynonyms = FieldSynonyms {
    field: "phone",
    columns: &["Telefone", "Phone", "telefone", "phone"],
};

pub const HAD_FOLLOW_UP: FieldSynonyms = FieldSynonyms {
    field: "had_follow_up",
    columns: &["Teve Follow Up", "Had Follow-up", "Had Follow Up"],
};

pub const FOLLOW_UP_REASON: FieldSynonyms = FieldSynonyms {
    field: "follow_up_reason",
    columns: &["Motivo Follow Up", "Follow-up Reason", "Follow Up Reason"],
};

pub const OBSERVATIONS: FieldSynonyms = FieldSynonyms {
    field: "observations",
    columns: &["Observações", "Observacoes", "Observations", "Notes"],
};

pub const MEETING_DATE: FieldSynonyms = FieldSynonyms {
    field: "meeting_date",
    columns: &["Data Reunião", "Data Reuniao", "Meeting Date"],
};

pub const ATTENDED_MEETING: FieldSynonyms = FieldSynonyms {
    field: "attended_meeting",
    columns: &["Compareceu", "Attended Meeting", "Attended"],
};

pub const PROPOSAL_DATE: FieldSynonyms = FieldSynonyms {
    field: "proposal_date",
    columns: &["Data Proposta", "Proposal Date"],
};

pub const PROPOSAL_VALUE: FieldSynonyms = FieldSynonyms {
    field: "proposal_value",
    columns: &["Valor Proposta", "Proposal Value"],
};

pub const SALE_DATE: FieldSynonyms = FieldSynonyms {
    field: "sale_date",
    columns: &["Data Venda", "Sale Date"],
};

pub const SALE_VALUE: FieldSynonyms = FieldSynonyms {
    field: "sale_value",
    columns: &["Valor Venda", "Sale Value"],
};
