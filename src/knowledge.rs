//! Built-in default knowledge base.
//!
//! Curated concept entries, category keyword rules, service matching rules,
//! and service descriptions for ocean-freight forwarding. All tables are
//! returned as ordered configuration objects; callers can swap in synthetic
//! rule sets through [`crate::config::PipelineConfig`].

use crate::config::{
    CategoryRule, CategoryRuleTable, ConceptBook, ConceptEntry, ServiceRule, ServiceRuleSet,
};
use crate::constants::services::PENDING_DESCRIPTION_TAIL;
use crate::data::CostCategory;

fn concept(
    description_zh: &str,
    description_en: &str,
    category: CostCategory,
    supplier_type: &str,
    usage_scenario: &str,
) -> ConceptEntry {
    ConceptEntry {
        description_zh: description_zh.to_string(),
        description_en: description_en.to_string(),
        category,
        supplier_type: supplier_type.to_string(),
        usage_scenario: usage_scenario.to_string(),
    }
}

/// Default concept knowledge base for the exact and fuzzy tiers.
///
/// Insertion order is the fuzzy-tier tie-break order; more specific
/// variants are listed before the generic name they contain.
pub fn default_concepts() -> ConceptBook {
    let mut book = ConceptBook::new();

    // 燃油附加类
    book.insert(
        "燃油附加费",
        concept(
            "因燃油价格波动而收取的附加费用，通常由船公司根据燃油市场价格变化进行调整，以弥补燃油成本上涨带来的损失。在海运整柜出口中，这是最常见的附加费之一。",
            "Fuel surcharge imposed due to fuel price fluctuations, typically adjusted by shipping lines based on fuel market price changes to offset losses from rising fuel costs.",
            CostCategory::CrossBorderTransport,
            "船公司",
            "所有海运航线，价格随国际油价波动调整",
        ),
    );
    book.insert(
        "燃油附加",
        concept(
            "燃油附加费的简称，由承运人收取以反映燃油价格变动的附加费用。",
            "Abbreviated form of fuel surcharge, collected by carriers to reflect fuel price fluctuations.",
            CostCategory::CrossBorderTransport,
            "船公司",
            "海运干线运输",
        ),
    );
    book.insert(
        "加油调节因素",
        concept(
            "BAF(Bunker Adjustment Factor)燃油调节因素，根据燃油价格变化调整的费用，通常以每TEU固定金额计算。",
            "BAF (Bunker Adjustment Factor), an adjustment fee based on fuel price changes, usually calculated as a fixed amount per TEU.",
            CostCategory::CrossBorderTransport,
            "船公司",
            "所有海运航线，按TEU收取",
        ),
    );

    // 码头港口类
    book.insert(
        "码头操作费",
        concept(
            "THC(Terminal Handling Charges)，涵盖集装箱从船上到码头堆场或从码头堆场到船上的所有相关操作费用，包括装卸、堆存、绑扎等。",
            "THC (Terminal Handling Charges), covering all container operations from ship to terminal yard or vice versa, including loading/unloading, stacking, lashing.",
            CostCategory::TerminalPortYard,
            "码头/场站",
            "集装箱在码头的装卸操作环节",
        ),
    );
    book.insert(
        "启运港码头操作费",
        concept(
            "OTHC(Original Terminal Handling Charges)，启运港码头操作费，覆盖起运港集装箱码头装卸作业的所有费用。",
            "OTHC (Original Terminal Handling Charges), covering all container terminal handling operations at the origin port.",
            CostCategory::TerminalPortYard,
            "启运港码头",
            "出口集装箱在启运港码头的操作",
        ),
    );
    book.insert(
        "目的港码头操作费",
        concept(
            "DTHC(Destination Terminal Handling Charges)，目的港集装箱码头装卸作业费，包括接收、堆放、搬运集装箱到指定位置的费用。",
            "DTHC (Destination Terminal Handling Charges), fees for receiving, stacking, and moving containers at the destination port.",
            CostCategory::TerminalPortYard,
            "目的港码头",
            "进口集装箱在目的港码头的操作",
        ),
    );

    // 集装箱类
    book.insert(
        "租箱费",
        concept(
            "集装箱超期使用费，当使用集装箱时间超过免费期限时产生的费用，通常按天计算。",
            "Container rental fee for overtime usage when container usage exceeds the free time limit, usually calculated daily.",
            CostCategory::Container,
            "船公司/箱东",
            "集装箱超过免费使用期",
        ),
    );
    book.insert(
        "提箱费",
        concept(
            "集装箱提取费用，在箱源短缺地区为调节供需平衡而收取的费用，用于覆盖供应商的额外调配成本。",
            "Container pickup charge to balance supply and demand in areas with container shortage, covering additional repositioning costs.",
            CostCategory::Container,
            "船公司/租箱公司",
            "集装箱短缺地区的提箱环节",
        ),
    );
    book.insert(
        "放箱费",
        concept(
            "集装箱放置费，当箱子不能直接进港时，需要临时放置产生的费用。",
            "Container drop-off fee when containers cannot be directly delivered to port and need temporary placement.",
            CostCategory::Container,
            "拖车公司/堆场",
            "码头未开放收箱时的临时堆放",
        ),
    );
    book.insert(
        "洗箱费",
        concept(
            "集装箱清洗费，对集装箱进行专业清洗服务的费用，特别适用于运输食品、化学品等特殊货物后。",
            "Container cleaning fee for professional washing services, especially after transporting food, chemicals, or other special cargo.",
            CostCategory::Container,
            "清洗服务商",
            "运输特殊货物后的清洗需求",
        ),
    );
    book.insert(
        "铅封费",
        concept(
            "集装箱铅封费用，为集装箱加装铅封以确保运输安全的费用。",
            "Container seal fee for installing seals to ensure transport security.",
            CostCategory::Container,
            "码头/海关",
            "集装箱封装环节",
        ),
    );

    // 关检类
    book.insert(
        "报关费",
        concept(
            "委托报关行办理货物出口报关手续的服务费用，包括单证审核、报关单填制、与海关沟通等专业服务。",
            "Customs clearance service fee for export procedures, including document review, declaration preparation, and customs communication.",
            CostCategory::CustomsInspection,
            "报关行",
            "所有需要报关的出口货物",
        ),
    );
    book.insert(
        "转关费",
        concept(
            "货物在转关运输过程中产生的费用，适用于从一个关区转移到另一个关区的货物。",
            "Transit customs fee for goods moving from one customs territory to another.",
            CostCategory::CustomsInspection,
            "报关行",
            "跨关区运输的货物",
        ),
    );
    book.insert(
        "关税",
        concept(
            "海关对进出口商品征收的税收，根据商品类别和税率计算。",
            "Import/export duties levied by customs authorities based on commodity classification and tax rates.",
            CostCategory::CustomsInspection,
            "海关",
            "进出口商品征税",
        ),
    );

    // 运输类
    book.insert(
        "海运费",
        concept(
            "承运人承运货物的基本运输费用，是海运服务的核心收费项目，通常按集装箱规格和航线距离计算。",
            "Basic ocean freight charges for cargo transportation, the core service fee calculated based on container specifications and route distance.",
            CostCategory::CrossBorderTransport,
            "船公司",
            "所有海运出口业务的基础费用",
        ),
    );
    book.insert(
        "拖车费",
        concept(
            "集装箱在陆地的短途运输费用，连接港口码头与货主工厂/仓库，是多式联运的重要环节。",
            "Container drayage fee for short-distance land transport connecting ports with shipper facilities, crucial for multimodal transport.",
            CostCategory::InlandTransport,
            "拖车公司",
            "集装箱陆上运输环节",
        ),
    );
    book.insert(
        "陆运费",
        concept(
            "货物通过公路运输产生的费用，包括车辆使用、燃油、人工等成本。",
            "Land transportation fee including vehicle usage, fuel, and labor costs for road transport.",
            CostCategory::InlandTransport,
            "运输公司",
            "货物陆路运输",
        ),
    );

    // 单证文件类
    book.insert(
        "舱单费",
        concept(
            "向海关申报船舶载运货物舱单信息的费用，是海运必备程序。",
            "Fee for manifest declaration to customs authorities, a mandatory procedure for ocean shipping.",
            CostCategory::Documentation,
            "船公司/船代",
            "所有海运出口业务",
        ),
    );
    book.insert(
        "电放费",
        concept(
            "电子放货费，通过电子方式放货而非纸质提单的服务费用。",
            "Electronic release fee for cargo release via electronic means instead of paper bill of lading.",
            CostCategory::Documentation,
            "船公司",
            "选择电放方式的货物",
        ),
    );
    book.insert(
        "换单费",
        concept(
            "在目的港用海运提单换取提货单的服务费用，获得提取货物的权利。",
            "Fee for exchanging ocean bill of lading for delivery order at destination port to obtain cargo release rights.",
            CostCategory::Documentation,
            "船代/目的港代理",
            "目的港提货换单环节",
        ),
    );
    book.insert(
        "VGM传输费",
        concept(
            "VGM(Verified Gross Mass)集装箱核实重量信息传输费，向相关部门传输集装箱核实重量信息的费用。",
            "VGM (Verified Gross Mass) transmission fee for sending container weight verification information to relevant authorities.",
            CostCategory::Documentation,
            "船公司/信息服务商",
            "SOLAS公约要求的VGM申报",
        ),
    );

    // 仓储类
    book.insert(
        "仓储费",
        concept(
            "货物在仓库存储期间产生的费用，包括存储、保管、装卸等服务。",
            "Warehouse storage fee including storage, custody, and handling services during the storage period.",
            CostCategory::Warehousing,
            "仓储公司",
            "货物仓储环节",
        ),
    );
    book.insert(
        "堆存费",
        concept(
            "货物或集装箱在指定场所堆放存储的费用，通常按时间计算。",
            "Storage fee for cargo or containers at designated facilities, usually calculated by time period.",
            CostCategory::Warehousing,
            "堆场/码头",
            "货物堆场存放期间",
        ),
    );

    // 保险与增值类
    book.insert(
        "保险费",
        concept(
            "为货物运输过程提供风险保障的费用，承保运输途中的各类损失。",
            "Insurance premium for cargo protection during transport, covering various losses during transit.",
            CostCategory::Insurance,
            "保险公司",
            "需要投保的货物运输",
        ),
    );
    book.insert(
        "熏蒸费",
        concept(
            "对木质包装或货物进行除虫杀菌处理的费用，符合进口国植检要求。",
            "Fumigation fee for pest and bacteria treatment of wooden packaging or cargo to meet import country phytosanitary requirements.",
            CostCategory::ValueAddedService,
            "熏蒸公司",
            "出口货物植检处理",
        ),
    );
    book.insert(
        "装箱费",
        concept(
            "将货物装入集装箱的服务费用，包括人工、设备使用等成本。",
            "Container loading fee including labor and equipment costs for stuffing cargo into containers.",
            CostCategory::Handling,
            "装箱队/货代",
            "集装箱装货环节",
        ),
    );

    book
}

fn category_rule(
    category: CostCategory,
    keywords: &[&str],
    supplier_type: &str,
    base_zh: &str,
    base_en: &str,
) -> CategoryRule {
    CategoryRule {
        category,
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        supplier_type: supplier_type.to_string(),
        base_description_zh: base_zh.to_string(),
        base_description_en: base_en.to_string(),
    }
}

/// Default keyword-to-category rule table.
///
/// Evaluation order matters: a name containing keywords from two rules is
/// classified by the earlier rule.
pub fn default_category_rules() -> CategoryRuleTable {
    let mut table = CategoryRuleTable::new();
    table.push(category_rule(
        CostCategory::CrossBorderTransport,
        &[
            "海运费", "空运费", "铁路运费", "燃油", "附加费", "BAF", "CAF", "PSS", "GRI", "CIC",
            "运河", "通道",
        ],
        "船公司/航空公司",
        "跨境运输过程中产生的费用",
        "cross-border transportation",
    ));
    table.push(category_rule(
        CostCategory::Container,
        &[
            "箱", "租箱", "提箱", "放箱", "押箱", "售箱", "洗箱", "修箱", "改装", "铅封", "箱使",
        ],
        "船公司/箱东",
        "集装箱使用过程中产生的相关费用",
        "container usage",
    ));
    table.push(category_rule(
        CostCategory::TerminalPortYard,
        &[
            "码头", "港口", "场站", "THC", "港杂", "堆存", "倒箱", "吊装", "搬倒", "安检",
        ],
        "码头/场站",
        "在码头、港口、场站进行作业时产生的费用",
        "terminal, port, and yard operations",
    ));
    table.push(category_rule(
        CostCategory::Handling,
        &["装卸", "理货", "装箱", "拆箱", "出库", "入库", "装货", "卸货"],
        "装卸公司",
        "货物装卸操作过程中产生的费用",
        "cargo loading and unloading",
    ));
    table.push(category_rule(
        CostCategory::InlandTransport,
        &[
            "陆运", "拖车", "送货", "提货", "短驳", "停车", "待时", "油费", "过路", "过桥",
        ],
        "运输公司",
        "境内运输过程中产生的各类费用",
        "domestic inland transportation",
    ));
    table.push(category_rule(
        CostCategory::CargoSurcharge,
        &["危险品", "超重", "超限", "超尺寸"],
        "承运人",
        "特殊货物属性引起的附加费用",
        "special cargo attributes",
    ));
    table.push(category_rule(
        CostCategory::Insurance,
        &["保险"],
        "保险公司",
        "货物运输保险保障产生的费用",
        "cargo transport insurance",
    ));
    table.push(category_rule(
        CostCategory::CustomsInspection,
        &[
            "报关", "转关", "报检", "查验", "关税", "增值税", "滞报", "退关", "海关", "商检",
        ],
        "报关行/海关",
        "报关报检及海关监管相关的费用",
        "customs declaration, inspection, and supervision",
    ));
    table.push(category_rule(
        CostCategory::Warehousing,
        &["仓储", "仓库", "库前", "出入库", "堆场"],
        "仓储公司",
        "货物仓储保管过程中产生的费用",
        "warehousing and cargo custody",
    ));
    table.push(category_rule(
        CostCategory::Documentation,
        &[
            "单证", "文件", "电放", "换单", "舱单", "VGM", "申报", "签证", "许可证", "证书",
        ],
        "船公司/代理",
        "单证文件制作、传输、申报等产生的费用",
        "documentation preparation, transmission, and filing",
    ));
    table.push(category_rule(
        CostCategory::EquipmentLease,
        &["叉车", "GPS", "设备", "租赁"],
        "设备租赁商",
        "设备使用及租赁产生的费用",
        "equipment usage and leasing",
    ));
    table.push(category_rule(
        CostCategory::ValueAddedService,
        &["包装", "熏蒸", "消毒", "贴标", "加固", "托盘", "检测", "鉴定"],
        "服务商",
        "为货物提供增值服务时产生的费用",
        "value-added cargo services",
    ));
    table.push(category_rule(
        CostCategory::Labor,
        &["人工"],
        "劳务公司",
        "人工作业产生的费用",
        "manual labor operations",
    ));
    table.push(category_rule(
        CostCategory::ProfitDistribution,
        &["佣金", "分成", "返还"],
        "合作方",
        "业务利润分配相关的科目",
        "business profit distribution",
    ));
    table.push(category_rule(
        CostCategory::Special,
        &["包干", "服务费", "门到门"],
        "待确认",
        "特殊业务安排产生的费用",
        "special business arrangements",
    ));
    table
}

fn service_rule(label: &str, keywords: &[&str]) -> ServiceRule {
    ServiceRule {
        label: label.to_string(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
    }
}

/// Default service-taxonomy matching rules, grouped by leg.
pub fn default_service_rules() -> ServiceRuleSet {
    let mut rules = ServiceRuleSet::new();
    // 启运地服务
    rules.push(service_rule("拖车", &["拖车", "陆运", "短驳", "送货", "提货"]));
    rules.push(service_rule(
        "报关",
        &["报关", "转关", "报检", "关税", "增值税", "查验", "申报"],
    ));
    rules.push(service_rule("仓储", &["仓储", "堆存", "入库", "出库", "库前"]));
    rules.push(service_rule("驳船", &["驳船", "内支线", "支线"]));
    rules.push(service_rule("国内铁路", &["铁路", "铁运"]));
    rules.push(service_rule("保险", &["保险"]));
    rules.push(service_rule("内装", &["装箱", "装货", "内装", "理货"]));
    // 干线服务
    rules.push(service_rule("舱单", &["舱单", "申报"]));
    rules.push(service_rule("HBL", &["HBL", "分单"]));
    rules.push(service_rule("MBL", &["MBL", "主单"]));
    rules.push(service_rule("订舱", &["订舱", "舱位"]));
    // 目的港服务
    rules.push(service_rule("换单", &["换单", "电放"]));
    rules.push(service_rule("清关", &["清关", "目的港报关", "目的港"]));
    rules.push(service_rule("派送", &["派送", "送货", "目的港派送"]));
    rules.push(service_rule("目的港仓储", &["目的港仓储", "目的港堆存"]));
    // 增值服务
    rules.push(service_rule("托盘", &["托盘"]));
    rules.push(service_rule("加固", &["加固", "包装", "固定"]));
    rules.push(service_rule("贴唛", &["贴标", "贴唛", "标识"]));
    rules.push(service_rule("熏蒸", &["熏蒸", "消毒"]));
    rules.push(service_rule("质量控制", &["质量", "监理", "检查", "验货", "现场"]));
    rules.push(service_rule("设备保护", &["设备", "GPS", "保护"]));
    rules
}

/// Curated descriptions for the service pass-through table.
const SERVICE_DESCRIPTIONS: [(&str, &str); 21] = [
    (
        "拖车",
        "负责集装箱在陆地的短途运输，连接港口码头与货主工厂/仓库，是多式联运的重要环节。执行人：拖车公司/运输公司。",
    ),
    (
        "报关",
        "向海关申报出口货物信息，办理通关手续。包括单证审核、税费计算、与海关沟通。执行人：报关行/报关员。",
    ),
    (
        "仓储",
        "提供货物临时存储、分拣、配送等仓储服务。执行人：仓储公司/第三方物流公司。",
    ),
    (
        "驳船",
        "通过内河水路运输连接内陆与海港，适用于长江等内河航道。执行人：驳船公司/内河运输公司。",
    ),
    (
        "国内铁路",
        "利用铁路网络进行货物运输，连接内陆城市与沿海港口。执行人：铁路公司/铁路物流公司。",
    ),
    (
        "保险",
        "为货物运输过程提供风险保障，承保运输途中的各类损失。执行人：保险公司/保险代理。",
    ),
    (
        "内装",
        "在发货人工厂或指定地点将货物装入集装箱。执行人：装箱队/货代公司。",
    ),
    (
        "舱单",
        "向海关申报船舶载运货物的舱单信息，是海运必备程序。执行人：船公司/船代。",
    ),
    (
        "HBL",
        "货代签发给货主的运输单据，是货代与货主之间的运输合同。执行人：货代公司。",
    ),
    (
        "MBL",
        "船公司签发的主提单，是承运人与托运人的运输合同。执行人：船公司/船代。",
    ),
    (
        "订舱",
        "向船公司预订舱位和集装箱，确保货物能够按期装船。执行人：货代公司。",
    ),
    (
        "换单",
        "在目的港用海运提单换取提货单，获得提取货物的权利。执行人：船代/目的港代理。",
    ),
    (
        "清关",
        "在目的港向当地海关申报进口货物，办理清关手续。执行人：目的港代理/清关行。",
    ),
    (
        "派送",
        "将货物从港口运输到收货人指定地点。执行人：拖车公司/派送公司。",
    ),
    (
        "目的港仓储",
        "在目的港提供货物仓储、分拨等服务。执行人：目的港仓储公司。",
    ),
    (
        "托盘",
        "提供托盘包装服务，便于货物装卸和堆垛。执行人：包装公司/货代。",
    ),
    (
        "加固",
        "对货物进行加固包装，防止运输过程中损坏。执行人：包装公司/专业加固队。",
    ),
    (
        "贴唛",
        "在货物包装上贴附运输标识和收货人信息。执行人：仓储公司/包装工。",
    ),
    (
        "熏蒸",
        "对木质包装或货物进行除虫杀菌处理，符合进口国植检要求。执行人：熏蒸公司。",
    ),
    (
        "质量控制",
        "对货物质量、包装等进行检验监督。执行人：检验公司/质检机构。",
    ),
    (
        "设备保护",
        "为运输设备提供防护和维护服务。执行人：设备维护公司。",
    ),
];

/// Human-readable description for a service label.
///
/// Unknown labels get a generic pending note so the pass-through table
/// never carries blank descriptions.
pub fn service_description(label: &str) -> String {
    SERVICE_DESCRIPTIONS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, description)| (*description).to_string())
        .unwrap_or_else(|| format!("{label}{PENDING_DESCRIPTION_TAIL}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concept_book_covers_core_fees() {
        let book = default_concepts();
        let ocean = book.get("海运费").expect("ocean freight concept");
        assert_eq!(ocean.category, CostCategory::CrossBorderTransport);
        assert_eq!(ocean.supplier_type, "船公司");
        assert!(!ocean.description_zh.is_empty());
        assert!(!ocean.description_en.is_empty());
    }

    #[test]
    fn category_rules_cover_every_category() {
        let table = default_category_rules();
        assert_eq!(table.len(), CostCategory::ALL.len());
        for (rule, category) in table.iter().zip(CostCategory::ALL) {
            assert_eq!(rule.category, category);
            assert!(!rule.keywords.is_empty());
        }
    }

    #[test]
    fn service_rules_have_unique_labels_and_descriptions() {
        let rules = default_service_rules();
        assert_eq!(rules.len(), SERVICE_DESCRIPTIONS.len());
        for rule in rules.iter() {
            assert!(!service_description(&rule.label).ends_with(PENDING_DESCRIPTION_TAIL));
        }
    }

    #[test]
    fn unknown_service_gets_pending_description() {
        let description = service_description("无人机配送");
        assert!(description.starts_with("无人机配送"));
        assert!(description.ends_with(PENDING_DESCRIPTION_TAIL));
    }
}
