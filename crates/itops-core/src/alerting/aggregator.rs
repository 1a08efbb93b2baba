//! Dashboard aggregation
//!
//! Rolls per-record classifications and per-module counts into the dashboard
//! summary and the severity-ordered alert feed. Everything is recomputed from
//! the snapshot on each call; nothing is cached or updated incrementally.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::AlertingConfig;
use crate::models::{
    Alert, Asset, AssetStatus, Bill, Dashboard, DashboardSummary, InventoryItem, Module,
    ModuleSummary, PurchaseStatus, Severity, Snapshot, Taxonomy, Ticket, TicketStatus,
};

use super::classifier::{
    classify_asset, classify_bill_with, classify_inventory_item, classify_ticket,
    AssetClassification, BillClassification,
};

/// Date format used in alert messages
const DISPLAY_DATE: &str = "%d/%m/%Y";

/// Builds dashboard summaries and alert feeds
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertAggregator {
    config: AlertingConfig,
}

impl AlertAggregator {
    /// Create an aggregator with the given horizons
    pub fn new(config: AlertingConfig) -> Self {
        Self { config }
    }

    /// Horizons in use
    pub fn config(&self) -> &AlertingConfig {
        &self.config
    }

    /// Classify a bill with the configured due-soon horizon
    pub fn classify_bill(&self, bill: &Bill, today: NaiveDate) -> BillClassification {
        classify_bill_with(bill, today, self.config.bill_due_soon_days)
    }

    /// Classify an asset with the configured license horizon
    pub fn classify_asset(&self, asset: &Asset, today: NaiveDate) -> AssetClassification {
        classify_asset(asset, today, self.config.license_expiry_days)
    }

    /// Per-module statistics
    ///
    /// `total` is the collection size; `by_status` partitions the records by
    /// their primary status field, so its counts sum to `total` whenever every
    /// status is a known value.
    pub fn build_summary(&self, snapshot: &Snapshot, today: NaiveDate) -> DashboardSummary {
        let summary = DashboardSummary {
            compras: self.summarize_purchases(snapshot),
            chamados: self.summarize_tickets(snapshot),
            ativos: self.summarize_assets(snapshot, today),
            inventario: self.summarize_inventory(snapshot),
            contas_mensais: self.summarize_bills(snapshot, today),
        };

        for module in Module::ALL {
            let unclassified = summary.module(module).unclassified();
            if unclassified > 0 {
                debug!(module = module.key(), unclassified, "Records with unknown status");
            }
        }

        summary
    }

    /// Alert feed, critical first
    ///
    /// One alert per record that classifies as warning or critical. Alerts of
    /// equal severity keep the order they were produced in: tickets, assets,
    /// inventory, bills, each in input order. An empty result means there is
    /// nothing to report.
    pub fn build_alerts(&self, snapshot: &Snapshot, today: NaiveDate) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for ticket in &snapshot.chamados {
            if let Some(severity) = classify_ticket(ticket).derived_status().severity() {
                alerts.push(ticket_alert(ticket, severity));
            }
        }

        for asset in &snapshot.ativos {
            let classification = self.classify_asset(asset, today);
            if let Some(severity) = classification.derived_status().severity() {
                alerts.push(asset_alert(asset, &classification, severity));
            }
        }

        for item in &snapshot.inventario {
            if let Some(severity) = classify_inventory_item(item).derived_status().severity() {
                alerts.push(inventory_alert(item, severity));
            }
        }

        for bill in &snapshot.contas_mensais {
            if self.classify_bill(bill, today).derived_status().severity().is_some() {
                alerts.push(bill_alert(bill));
            }
        }

        // Stable: equal severities keep production order
        alerts.sort_by(|a, b| b.severity.cmp(&a.severity));

        debug!(
            total = alerts.len(),
            critical = alerts.iter().filter(|a| a.severity == Severity::Critical).count(),
            "Built alert feed"
        );

        alerts
    }

    /// Summary and alerts from the same snapshot
    pub fn build_dashboard(&self, snapshot: &Snapshot, today: NaiveDate) -> Dashboard {
        Dashboard {
            summary: self.build_summary(snapshot, today),
            alerts: self.build_alerts(snapshot, today),
        }
    }

    fn summarize_purchases(&self, snapshot: &Snapshot) -> ModuleSummary {
        let purchases = &snapshot.compras;
        let in_flight = purchases
            .iter()
            .filter(|p| {
                matches!(
                    p.status,
                    PurchaseStatus::Requested | PurchaseStatus::Approved | PurchaseStatus::InProgress
                )
            })
            .count();

        ModuleSummary {
            total: purchases.len(),
            by_status: count_by(purchases.iter().map(|p| &p.status)),
            highlights: highlights([
                ("pendentes", count_status(purchases.iter().map(|p| &p.status), &PurchaseStatus::Requested)),
                ("em_aberto", in_flight),
            ]),
        }
    }

    fn summarize_tickets(&self, snapshot: &Snapshot) -> ModuleSummary {
        let tickets = &snapshot.chamados;
        let critical = tickets
            .iter()
            .filter(|t| classify_ticket(t).derived_status().severity().is_some())
            .count();
        let unresolved = tickets
            .iter()
            .filter(|t| {
                matches!(
                    t.status,
                    TicketStatus::Open | TicketStatus::InProgress | TicketStatus::Waiting
                )
            })
            .count();

        ModuleSummary {
            total: tickets.len(),
            by_status: count_by(tickets.iter().map(|t| &t.status)),
            highlights: highlights([
                ("abertos", count_status(tickets.iter().map(|t| &t.status), &TicketStatus::Open)),
                ("criticos", critical),
                ("em_aberto", unresolved),
            ]),
        }
    }

    fn summarize_assets(&self, snapshot: &Snapshot, today: NaiveDate) -> ModuleSummary {
        let assets = &snapshot.ativos;
        let expiring = assets
            .iter()
            .filter(|a| self.classify_asset(a, today).license_expiring)
            .count();
        let in_service = assets
            .iter()
            .filter(|a| a.status == AssetStatus::Active)
            .count();

        ModuleSummary {
            total: assets.len(),
            by_status: count_by(assets.iter().map(|a| &a.status)),
            highlights: highlights([("em_uso", in_service), ("licencas_vencendo", expiring)]),
        }
    }

    fn summarize_inventory(&self, snapshot: &Snapshot) -> ModuleSummary {
        let items = &snapshot.inventario;
        let low_stock = items
            .iter()
            .filter(|i| classify_inventory_item(i).low_stock)
            .count();

        ModuleSummary {
            total: items.len(),
            by_status: count_by(items.iter().map(|i| &i.tipo_item)),
            highlights: highlights([("total_itens", items.len()), ("estoque_baixo", low_stock)]),
        }
    }

    fn summarize_bills(&self, snapshot: &Snapshot, today: NaiveDate) -> ModuleSummary {
        let bills = &snapshot.contas_mensais;
        let (overdue, due_soon) = bills
            .iter()
            .map(|b| self.classify_bill(b, today))
            .fold((0, 0), |(overdue, due_soon), c| {
                (overdue + usize::from(c.overdue), due_soon + usize::from(c.due_soon))
            });

        ModuleSummary {
            total: bills.len(),
            by_status: count_by(bills.iter().map(|b| &b.status_pagamento)),
            highlights: highlights([("vencidas", overdue), ("vencendo", due_soon)]),
        }
    }
}

/// Summary with default horizons
pub fn build_summary(snapshot: &Snapshot, today: NaiveDate) -> DashboardSummary {
    AlertAggregator::default().build_summary(snapshot, today)
}

/// Alert feed with default horizons
pub fn build_alerts(snapshot: &Snapshot, today: NaiveDate) -> Vec<Alert> {
    AlertAggregator::default().build_alerts(snapshot, today)
}

/// Count records per known taxonomy value; every known value gets an entry
fn count_by<'a, T>(values: impl IntoIterator<Item = &'a T>) -> BTreeMap<String, usize>
where
    T: Taxonomy + 'a,
{
    let mut counts: BTreeMap<String, usize> =
        T::KNOWN.iter().map(|known| ((*known).to_string(), 0)).collect();

    for value in values {
        if let Some(count) = counts.get_mut(value.as_str()) {
            *count += 1;
        }
    }

    counts
}

fn count_status<'a, T: PartialEq + 'a>(values: impl IntoIterator<Item = &'a T>, wanted: &T) -> usize {
    values.into_iter().filter(|v| *v == wanted).count()
}

fn highlights<const N: usize>(entries: [(&str, usize); N]) -> BTreeMap<String, usize> {
    entries
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

fn ticket_alert(ticket: &Ticket, severity: Severity) -> Alert {
    let title = ticket.titulo.trim();
    let message = if title.is_empty() {
        format!("Chamado {} crítico em aberto", ticket.display_number())
    } else {
        format!("Chamado {} crítico em aberto: {}", ticket.display_number(), title)
    };
    Alert {
        message,
        severity,
        module: Module::Tickets,
    }
}

fn asset_alert(asset: &Asset, classification: &AssetClassification, severity: Severity) -> Alert {
    let expiry = asset
        .data_vencimento_licenca
        .map(|d| d.format(DISPLAY_DATE).to_string())
        .unwrap_or_default();
    let message = if classification.license_expired {
        format!("Licença de {} vencida desde {}", asset.display_name(), expiry)
    } else {
        format!("Licença de {} vence em {}", asset.display_name(), expiry)
    };
    Alert {
        message,
        severity,
        module: Module::Assets,
    }
}

fn inventory_alert(item: &InventoryItem, severity: Severity) -> Alert {
    Alert {
        message: format!(
            "{} com estoque abaixo do mínimo ({} de {})",
            item.display_name(),
            item.quantidade,
            item.quantidade_minima
        ),
        severity,
        module: Module::Inventory,
    }
}

fn bill_alert(bill: &Bill) -> Alert {
    let due = bill
        .data_vencimento
        .map(|d| d.format(DISPLAY_DATE).to_string())
        .unwrap_or_default();
    Alert::critical(
        Module::Bills,
        format!("Conta {} vencida desde {}", bill.display_name(), due),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AssetKind, DerivedStatus, InventoryKind, PaymentStatus, Purchase, TicketPriority,
    };
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 1, 10)
    }

    fn overdue_bill(id: i64) -> Bill {
        Bill {
            id,
            tipo_conta: format!("Conta {id}"),
            data_vencimento: Some(date(2024, 1, 1)),
            status_pagamento: PaymentStatus::Pending,
            ..Default::default()
        }
    }

    fn paid_bill(id: i64) -> Bill {
        Bill {
            status_pagamento: PaymentStatus::Paid,
            ..overdue_bill(id)
        }
    }

    fn low_item(id: i64) -> InventoryItem {
        InventoryItem {
            id,
            nome: format!("Item {id}"),
            quantidade: 1,
            quantidade_minima: 5,
            ..Default::default()
        }
    }

    fn stocked_item(id: i64) -> InventoryItem {
        InventoryItem {
            quantidade: 50,
            ..low_item(id)
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::default();

        assert!(build_alerts(&snapshot, today()).is_empty());

        let summary = build_summary(&snapshot, today());
        for module in Module::ALL {
            let s = summary.module(module);
            assert_eq!(s.total, 0);
            assert!(s.by_status.values().all(|&c| c == 0));
            assert!(s.highlights.values().all(|&c| c == 0));
        }
    }

    #[test]
    fn test_no_alerts_when_everything_is_fine() {
        let snapshot = Snapshot {
            contas_mensais: vec![paid_bill(1)],
            inventario: vec![stocked_item(1)],
            ..Default::default()
        };
        assert_eq!(build_alerts(&snapshot, today()), Vec::<Alert>::new());
    }

    #[test]
    fn test_critical_before_warning_in_either_order() {
        let a = Snapshot {
            contas_mensais: vec![overdue_bill(1)],
            inventario: vec![low_item(1)],
            ..Default::default()
        };
        let alerts = build_alerts(&a, today());
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[0].module, Module::Bills);
        assert_eq!(alerts[1].severity, Severity::Warning);
        assert_eq!(alerts[1].module, Module::Inventory);
    }

    #[test]
    fn test_equal_severity_keeps_input_order() {
        let snapshot = Snapshot {
            inventario: vec![low_item(3), stocked_item(9), low_item(1), low_item(2)],
            ..Default::default()
        };
        let messages: Vec<String> = build_alerts(&snapshot, today())
            .into_iter()
            .map(|a| a.message)
            .collect();

        assert_eq!(
            messages,
            vec![
                "Item 3 com estoque abaixo do mínimo (1 de 5)",
                "Item 1 com estoque abaixo do mínimo (1 de 5)",
                "Item 2 com estoque abaixo do mínimo (1 de 5)",
            ]
        );
    }

    #[test]
    fn test_alert_messages_per_module() {
        let snapshot = Snapshot {
            chamados: vec![Ticket {
                id: 7,
                numero_chamado: "2024-000007".to_string(),
                titulo: "Servidor fora do ar".to_string(),
                prioridade: TicketPriority::Critical,
                status: TicketStatus::Open,
                ..Default::default()
            }],
            ativos: vec![Asset {
                id: 2,
                nome: "Office 365".to_string(),
                tipo_ativo: AssetKind::License,
                status: AssetStatus::Active,
                data_vencimento_licenca: Some(date(2024, 1, 20)),
                ..Default::default()
            }],
            contas_mensais: vec![Bill {
                tipo_conta: "Internet".to_string(),
                ..overdue_bill(4)
            }],
            ..Default::default()
        };

        let alerts = build_alerts(&snapshot, today());

        assert_eq!(
            alerts,
            vec![
                Alert::critical(
                    Module::Tickets,
                    "Chamado 2024-000007 crítico em aberto: Servidor fora do ar"
                ),
                Alert::critical(Module::Bills, "Conta Internet vencida desde 01/01/2024"),
                Alert::warning(Module::Assets, "Licença de Office 365 vence em 20/01/2024"),
            ]
        );
    }

    #[test]
    fn test_due_soon_bills_do_not_alert() {
        let snapshot = Snapshot {
            contas_mensais: vec![Bill {
                data_vencimento: Some(date(2024, 1, 12)),
                ..overdue_bill(1)
            }],
            ..Default::default()
        };

        let classification = classify_bill_with(&snapshot.contas_mensais[0], today(), 7);
        assert!(classification.due_soon);
        assert_eq!(classification.derived_status(), DerivedStatus::None);

        assert!(build_alerts(&snapshot, today()).is_empty());
        let summary = build_summary(&snapshot, today());
        assert_eq!(summary.contas_mensais.highlight("vencendo"), 1);
        assert_eq!(summary.contas_mensais.highlight("vencidas"), 0);
    }

    #[test]
    fn test_summary_counts() {
        let snapshot = Snapshot {
            compras: vec![
                Purchase {
                    status: PurchaseStatus::Requested,
                    ..Default::default()
                },
                Purchase {
                    status: PurchaseStatus::Delivered,
                    ..Default::default()
                },
                Purchase {
                    status: PurchaseStatus::from("extraviado"),
                    ..Default::default()
                },
            ],
            inventario: vec![
                low_item(1),
                InventoryItem {
                    tipo_item: InventoryKind::PeriodicLicense,
                    ..stocked_item(2)
                },
            ],
            contas_mensais: vec![overdue_bill(1), paid_bill(2)],
            ..Default::default()
        };

        let summary = build_summary(&snapshot, today());

        let compras = &summary.compras;
        assert_eq!(compras.total, 3);
        assert_eq!(compras.status("solicitado"), 1);
        assert_eq!(compras.status("entregue"), 1);
        assert_eq!(compras.status("aprovado"), 0);
        assert_eq!(compras.unclassified(), 1);
        assert!(!compras.by_status.contains_key("extraviado"));
        assert_eq!(compras.highlight("em_aberto"), 1);
        assert_eq!(compras.highlight("pendentes"), 1);

        let inventario = &summary.inventario;
        assert_eq!(inventario.total, 2);
        assert_eq!(inventario.status("hardware"), 1);
        assert_eq!(inventario.status("licenca_periodica"), 1);
        assert_eq!(inventario.highlight("estoque_baixo"), 1);
        assert_eq!(inventario.highlight("total_itens"), 2);

        let contas = &summary.contas_mensais;
        assert_eq!(contas.status("pendente"), 1);
        assert_eq!(contas.status("pago"), 1);
        assert_eq!(contas.highlight("vencidas"), 1);
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = build_summary(&Snapshot::default(), today());
        let json = serde_json::to_value(&summary).unwrap();

        for key in ["compras", "chamados", "ativos", "inventario", "contas_mensais"] {
            assert_eq!(json[key]["total"], 0, "module {key}");
            assert!(json[key].get("por_status").is_none());
        }
        assert_eq!(json["chamados"]["aguardando"], 0);
        // Keys read by the console dashboard
        for (module, key) in [
            ("compras", "pendentes"),
            ("compras", "em_andamento"),
            ("chamados", "abertos"),
            ("chamados", "em_andamento"),
            ("chamados", "criticos"),
            ("ativos", "licencas_vencendo"),
            ("inventario", "total_itens"),
            ("inventario", "estoque_baixo"),
            ("contas_mensais", "vencidas"),
            ("contas_mensais", "vencendo"),
        ] {
            assert_eq!(json[module][key], 0, "{module}.{key}");
        }
    }

    #[test]
    fn test_custom_horizons() {
        let aggregator = AlertAggregator::new(AlertingConfig {
            bill_due_soon_days: 1,
            license_expiry_days: 5,
        });
        let snapshot = Snapshot {
            ativos: vec![Asset {
                status: AssetStatus::Active,
                data_vencimento_licenca: Some(date(2024, 1, 20)),
                ..Default::default()
            }],
            contas_mensais: vec![Bill {
                data_vencimento: Some(date(2024, 1, 12)),
                ..overdue_bill(1)
            }],
            ..Default::default()
        };

        let dashboard = aggregator.build_dashboard(&snapshot, today());
        assert!(dashboard.alerts.is_empty());
        assert_eq!(dashboard.summary.ativos.highlight("licencas_vencendo"), 0);
        assert_eq!(dashboard.summary.contas_mensais.highlight("vencendo"), 0);
    }

    fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
        let purchase = prop::sample::select(PurchaseStatus::KNOWN.to_vec())
            .prop_map(|s| Purchase { status: PurchaseStatus::from(s), ..Default::default() });
        let ticket = (
            prop::sample::select(TicketStatus::KNOWN.to_vec()),
            prop::sample::select(TicketPriority::KNOWN.to_vec()),
        )
            .prop_map(|(s, p)| Ticket {
                status: TicketStatus::from(s),
                prioridade: TicketPriority::from(p),
                ..Default::default()
            });
        let asset = (prop::sample::select(AssetStatus::KNOWN.to_vec()), proptest::option::of(-60i64..60))
            .prop_map(|(s, offset)| Asset {
                status: AssetStatus::from(s),
                data_vencimento_licenca: offset.map(|o| today() + chrono::Duration::days(o)),
                ..Default::default()
            });
        let item = (0i64..20, 0i64..20).prop_map(|(q, m)| InventoryItem {
            quantidade: q,
            quantidade_minima: m,
            ..Default::default()
        });
        let bill = (prop::sample::select(PaymentStatus::KNOWN.to_vec()), -30i64..30).prop_map(
            |(s, offset)| Bill {
                status_pagamento: PaymentStatus::from(s),
                data_vencimento: Some(today() + chrono::Duration::days(offset)),
                ..Default::default()
            },
        );

        (
            prop::collection::vec(purchase, 0..20),
            prop::collection::vec(ticket, 0..20),
            prop::collection::vec(asset, 0..20),
            prop::collection::vec(item, 0..20),
            prop::collection::vec(bill, 0..20),
        )
            .prop_map(|(compras, chamados, ativos, inventario, contas_mensais)| Snapshot {
                compras,
                chamados,
                ativos,
                inventario,
                contas_mensais,
                rejected: 0,
            })
    }

    proptest! {
        #[test]
        fn prop_known_statuses_sum_to_total(snapshot in arb_snapshot()) {
            let summary = build_summary(&snapshot, today());
            for module in Module::ALL {
                let s = summary.module(module);
                prop_assert_eq!(s.by_status.values().sum::<usize>(), s.total);
                prop_assert_eq!(s.total, snapshot.len(module));
            }
        }

        #[test]
        fn prop_alerts_are_sorted_by_severity(snapshot in arb_snapshot()) {
            let alerts = build_alerts(&snapshot, today());
            prop_assert!(alerts.windows(2).all(|w| w[0].severity >= w[1].severity));
        }

        #[test]
        fn prop_one_alert_per_flagged_record(snapshot in arb_snapshot()) {
            let aggregator = AlertAggregator::default();
            let today = today();
            let flagged = snapshot.chamados.iter().map(|t| classify_ticket(t).derived_status())
                .chain(snapshot.ativos.iter().map(|a| aggregator.classify_asset(a, today).derived_status()))
                .chain(snapshot.inventario.iter().map(|i| classify_inventory_item(i).derived_status()))
                .chain(snapshot.contas_mensais.iter().map(|b| aggregator.classify_bill(b, today).derived_status()))
                .filter(|status| *status != DerivedStatus::None)
                .count();
            prop_assert_eq!(aggregator.build_alerts(&snapshot, today).len(), flagged);
        }

        #[test]
        fn prop_aggregation_is_idempotent(snapshot in arb_snapshot()) {
            prop_assert_eq!(build_summary(&snapshot, today()), build_summary(&snapshot, today()));
            prop_assert_eq!(build_alerts(&snapshot, today()), build_alerts(&snapshot, today()));
        }
    }
}
